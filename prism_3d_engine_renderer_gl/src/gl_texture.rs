/// GlTexture - 2D RGBA8 texture
///
/// Pixels are uploaded through a transient pixel-unpack buffer into
/// immutable single-level storage.

use std::rc::Rc;
use glow::HasContext;
use prism_3d_engine::prism3d::render::Texture;
use prism_3d_engine::prism3d::{log_error, Error, Result};
use prism_3d_engine::{engine_err, engine_trace};
use crate::gl_debug::check_errors;

pub struct GlTexture {
    gl: Rc<glow::Context>,
    texture: glow::Texture,
    width: u32,
    height: u32,
}

impl GlTexture {
    /// Create a texture from tightly packed RGBA8 rows (bottom row first)
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if `pixels` is not `width * height * 4` bytes.
    pub fn from_rgba8(gl: Rc<glow::Context>, width: u32, height: u32, pixels: &[u8]) -> Result<Self> {
        check_rgba8_size(width, height, pixels.len())?;

        unsafe {
            let texture = gl.create_texture()
                .map_err(|e| engine_err!("prism3d::gl::Texture", "glGenTextures failed: {}", e))?;
            let staging = match gl.create_buffer() {
                Ok(buffer) => buffer,
                Err(e) => {
                    gl.delete_texture(texture);
                    return Err(engine_err!("prism3d::gl::Texture", "glGenBuffers failed: {}", e));
                }
            };

            gl.bind_buffer(glow::PIXEL_UNPACK_BUFFER, Some(staging));
            gl.buffer_data_u8_slice(glow::PIXEL_UNPACK_BUFFER, pixels, glow::STREAM_DRAW);

            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_storage_2d(glow::TEXTURE_2D, 1, glow::RGBA8, width as i32, height as i32);
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_sub_image_2d(
                glow::TEXTURE_2D, 0, 0, 0, width as i32, height as i32,
                glow::RGBA, glow::UNSIGNED_BYTE, glow::PixelUnpackData::BufferOffset(0),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.bind_texture(glow::TEXTURE_2D, None);

            gl.bind_buffer(glow::PIXEL_UNPACK_BUFFER, None);
            gl.delete_buffer(staging);
            check_errors(&gl, "texture upload");

            engine_trace!("prism3d::gl::Texture", "Created texture {} ({}x{})", texture.0.get(), width, height);
            Ok(Self { gl, texture, width, height })
        }
    }
}

/// A non-empty image of `width * height` RGBA8 pixels
pub(crate) fn check_rgba8_size(width: u32, height: u32, len: usize) -> Result<()> {
    let expected = width as usize * height as usize * 4;
    if width == 0 || height == 0 || len != expected {
        return Err(log_error("prism3d::gl::Texture", Error::InvalidResource(format!(
            "{}x{} RGBA8 texture needs {} bytes, got {}", width, height, expected, len
        ))));
    }
    Ok(())
}

impl Texture for GlTexture {
    fn id(&self) -> u32 {
        self.texture.0.get()
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        }
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.texture);
        }
    }
}

#[cfg(test)]
#[path = "gl_texture_tests.rs"]
mod tests;
