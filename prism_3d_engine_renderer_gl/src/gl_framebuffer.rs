/// GlFramebuffer - offscreen render target with texture color attachments
///
/// GlScreenFramebuffer - the window's default framebuffer

use std::rc::Rc;
use glow::HasContext;
use prism_3d_engine::prism3d::render::{Framebuffer, FramebufferId};
use prism_3d_engine::prism3d::{log_error, Error, Result};
use prism_3d_engine::engine_debug;
use crate::gl_debug::check_errors;
use crate::gl_format::framebuffer_status_name;

/// Offscreen framebuffer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferConfig {
    /// Sized internal format of every color attachment (e.g. `glow::RGB8`)
    pub color_format: u32,
    /// Attach a 24-bit depth renderbuffer
    pub use_depth_buffer: bool,
    /// Number of color attachments (COLOR_ATTACHMENT0..n)
    pub num_color_buffers: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for FramebufferConfig {
    fn default() -> Self {
        Self {
            color_format: glow::RGB8,
            use_depth_buffer: true,
            num_color_buffers: 1,
            width: 800,
            height: 600,
        }
    }
}

impl FramebufferConfig {
    /// At least one color buffer and a non-zero size
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` describing the rejected configuration.
    pub fn validate(&self) -> Result<()> {
        if self.num_color_buffers == 0 || self.width == 0 || self.height == 0 {
            return Err(init_failed(format!(
                "framebuffer needs at least one color buffer and a non-zero size (got {} buffers, {}x{})",
                self.num_color_buffers, self.width, self.height
            )));
        }
        Ok(())
    }
}

fn init_failed(message: String) -> Error {
    log_error("prism3d::gl::Framebuffer", Error::InitializationFailed(message))
}

pub struct GlFramebuffer {
    gl: Rc<glow::Context>,
    framebuffer: glow::Framebuffer,
    color_textures: Vec<glow::Texture>,
    depth_buffer: Option<glow::Renderbuffer>,
    width: u32,
    height: u32,
    debug_name: String,
}

impl GlFramebuffer {
    /// Create the framebuffer and all its attachments
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` if an object cannot be created or the
    /// framebuffer is incomplete. Anything already created is released.
    pub fn new(gl: Rc<glow::Context>, config: &FramebufferConfig) -> Result<Self> {
        config.validate()?;

        let framebuffer = unsafe { gl.create_framebuffer() }
            .map_err(|e| init_failed(format!("glGenFramebuffers failed: {}", e)))?;

        // From here on Drop releases whatever was created
        let mut target = Self {
            gl: gl.clone(),
            framebuffer,
            color_textures: Vec::with_capacity(config.num_color_buffers as usize),
            depth_buffer: None,
            width: config.width,
            height: config.height,
            debug_name: String::new(),
        };

        let previous = target.current_binding();
        let result = unsafe { target.attach(config) };
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, previous);
        }
        result?;

        engine_debug!("prism3d::gl::Framebuffer", "Created framebuffer {} ({}x{}, {} color, depth: {})",
            target.id(), config.width, config.height, config.num_color_buffers, config.use_depth_buffer);
        Ok(target)
    }

    unsafe fn attach(&mut self, config: &FramebufferConfig) -> Result<()> {
        let gl = self.gl.clone();
        let (width, height) = (config.width as i32, config.height as i32);

        gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.framebuffer));

        let mut draw_buffers = Vec::with_capacity(config.num_color_buffers as usize);
        for index in 0..config.num_color_buffers {
            let texture = gl.create_texture()
                .map_err(|e| init_failed(format!("glGenTextures failed: {}", e)))?;
            self.color_textures.push(texture);

            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_storage_2d(glow::TEXTURE_2D, 1, config.color_format, width, height);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);

            let attachment = glow::COLOR_ATTACHMENT0 + index;
            gl.framebuffer_texture_2d(glow::FRAMEBUFFER, attachment, glow::TEXTURE_2D, Some(texture), 0);
            draw_buffers.push(attachment);
        }
        gl.bind_texture(glow::TEXTURE_2D, None);
        gl.draw_buffers(&draw_buffers);

        if config.use_depth_buffer {
            let depth = gl.create_renderbuffer()
                .map_err(|e| init_failed(format!("glGenRenderbuffers failed: {}", e)))?;
            self.depth_buffer = Some(depth);

            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(depth));
            gl.renderbuffer_storage(glow::RENDERBUFFER, glow::DEPTH_COMPONENT24, width, height);
            gl.framebuffer_renderbuffer(glow::FRAMEBUFFER, glow::DEPTH_ATTACHMENT, glow::RENDERBUFFER, Some(depth));
            gl.bind_renderbuffer(glow::RENDERBUFFER, None);
        }
        check_errors(&gl, "framebuffer attachments");

        let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
        if status != glow::FRAMEBUFFER_COMPLETE {
            return Err(init_failed(format!(
                "framebuffer {} incomplete: {} (0x{:04X})", self.id(), framebuffer_status_name(status), status
            )));
        }
        Ok(())
    }

    fn current_binding(&self) -> Option<glow::Framebuffer> {
        let bound = unsafe { self.gl.get_parameter_i32(glow::FRAMEBUFFER_BINDING) };
        std::num::NonZeroU32::new(bound as u32).map(glow::NativeFramebuffer)
    }

    pub fn set_debug_name(&mut self, name: &str) {
        self.debug_name = name.to_string();
    }

    /// GL name of color attachment `index`
    ///
    /// # Errors
    ///
    /// `Error::InvalidReference` if `index` is past the last attachment.
    pub fn color_buffer_id(&self, index: usize) -> Result<u32> {
        self.color_textures
            .get(index)
            .map(|texture| texture.0.get())
            .ok_or_else(|| log_error("prism3d::gl::Framebuffer", Error::InvalidReference(format!(
                "color buffer {} out of range ({} attached)", index, self.color_textures.len()
            ))))
    }

    pub fn color_buffer_count(&self) -> usize {
        self.color_textures.len()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Framebuffer for GlFramebuffer {
    fn id(&self) -> FramebufferId {
        self.framebuffer.0.get()
    }

    fn bind(&self) {
        if self.current_binding() == Some(self.framebuffer) {
            return;
        }
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.framebuffer));
        }
    }

    fn debug_name(&self) -> &str {
        &self.debug_name
    }
}

impl Drop for GlFramebuffer {
    fn drop(&mut self) {
        unsafe {
            if let Some(depth) = self.depth_buffer.take() {
                self.gl.delete_renderbuffer(depth);
            }
            for texture in self.color_textures.drain(..) {
                self.gl.delete_texture(texture);
            }
            self.gl.delete_framebuffer(self.framebuffer);
        }
    }
}

/// The window's default framebuffer (GL name 0)
pub struct GlScreenFramebuffer {
    gl: Rc<glow::Context>,
}

impl GlScreenFramebuffer {
    pub fn new(gl: Rc<glow::Context>) -> Self {
        Self { gl }
    }
}

impl Framebuffer for GlScreenFramebuffer {
    fn id(&self) -> FramebufferId {
        0
    }

    fn bind(&self) {
        unsafe {
            if self.gl.get_parameter_i32(glow::FRAMEBUFFER_BINDING) != 0 {
                self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            }
        }
    }

    fn debug_name(&self) -> &str {
        "screen"
    }
}

#[cfg(test)]
#[path = "gl_framebuffer_tests.rs"]
mod tests;
