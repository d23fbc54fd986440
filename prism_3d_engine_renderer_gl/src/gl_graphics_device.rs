/// GlGraphicsDevice - OpenGL 4.x implementation of GraphicsDevice
///
/// Wraps a shared glow context. The context must be current on the calling
/// thread for the whole lifetime of the device and of every object it creates.

use std::num::NonZeroU32;
use std::rc::Rc;
use glow::HasContext;
use rustc_hash::FxHashMap;
use prism_3d_engine::prism3d::render::{
    Buffer, BufferDesc, GraphicsDevice, PrimitiveTopology, ShaderId, VertexArray, VertexLayout,
};
use prism_3d_engine::prism3d::Result;
use prism_3d_engine::{engine_err, engine_info, engine_trace};
use crate::gl_buffer::{GlBuffer, GlVertexArray};
use crate::gl_debug::check_errors;
use crate::gl_format::{buffer_format_to_gl, topology_to_gl};

/// Uniform written by `set_point_size`; vertex shaders that draw points
/// assign it to gl_PointSize
pub const POINT_SIZE_UNIFORM: &str = "point_size";

/// Uniform locations per program id, each looked up once
pub(crate) struct LocationCache<L> {
    locations: FxHashMap<ShaderId, Option<L>>,
}

impl<L: Clone> LocationCache<L> {
    pub(crate) fn new() -> Self {
        Self { locations: FxHashMap::default() }
    }

    /// Cached location of `program`, running `lookup` on the first request
    pub(crate) fn get_or_lookup(&mut self, program: ShaderId, lookup: impl FnOnce() -> Option<L>) -> Option<L> {
        self.locations.entry(program).or_insert_with(lookup).clone()
    }

    pub(crate) fn forget(&mut self, program: ShaderId) {
        self.locations.remove(&program);
    }
}

pub struct GlGraphicsDevice {
    gl: Rc<glow::Context>,
    current_program: Option<glow::Program>,
    point_size_locations: LocationCache<glow::UniformLocation>,
}

impl GlGraphicsDevice {
    /// Take a context and enable the state the engine relies on
    /// (depth testing and shader-controlled point size)
    pub fn new(gl: Rc<glow::Context>) -> Self {
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.enable(glow::PROGRAM_POINT_SIZE);
        }
        check_errors(&gl, "device setup");

        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        engine_info!("prism3d::gl::GraphicsDevice", "OpenGL device ready ({})", version);

        Self { gl, current_program: None, point_size_locations: LocationCache::new() }
    }

    /// Shared context, for creating shaders, framebuffers and textures
    pub fn context(&self) -> &Rc<glow::Context> {
        &self.gl
    }

    /// Drop cached uniform locations of a deleted program
    ///
    /// GL may hand the same name to a later program.
    pub fn forget_program(&mut self, program: ShaderId) {
        self.point_size_locations.forget(program);
    }

    /// Clear color and depth of the bound framebuffer
    pub fn clear(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    /// Set the viewport to the full target size
    pub fn set_viewport(&self, width: u32, height: u32) {
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
    }
}

impl GraphicsDevice for GlGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Box<dyn Buffer>> {
        let buffer = unsafe { self.gl.create_buffer() }
            .map_err(|e| engine_err!("prism3d::gl::GraphicsDevice", "glGenBuffers failed: {}", e))?;
        let buffer = GlBuffer::new(self.gl.clone(), buffer, desc.kind);
        buffer.update(desc.data, desc.usage)?;

        engine_trace!("prism3d::gl::GraphicsDevice", "Created {:?} buffer {} ({} bytes)",
            desc.kind, buffer.id(), desc.data.len());
        Ok(Box::new(buffer))
    }

    fn create_vertex_array(
        &mut self,
        layout: &VertexLayout,
        vertex_buffer: &dyn Buffer,
        index_buffer: &dyn Buffer,
    ) -> Result<Box<dyn VertexArray>> {
        let vertex_array = unsafe { self.gl.create_vertex_array() }
            .map_err(|e| engine_err!("prism3d::gl::GraphicsDevice", "glGenVertexArrays failed: {}", e))?;

        unsafe {
            self.gl.bind_vertex_array(Some(vertex_array));
            self.gl.bind_buffer(glow::ARRAY_BUFFER, GlBuffer::native(vertex_buffer));

            for attribute in &layout.attributes {
                let (size, data_type) = buffer_format_to_gl(attribute.format);
                self.gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    size,
                    data_type,
                    false,
                    layout.stride as i32,
                    attribute.offset as i32,
                );
                self.gl.enable_vertex_attrib_array(attribute.location);
            }

            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, GlBuffer::native(index_buffer));

            // Element binding is VAO state: unbind the VAO before the buffers
            self.gl.bind_vertex_array(None);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
        check_errors(&self.gl, "vertex array setup");

        Ok(Box::new(GlVertexArray::new(self.gl.clone(), vertex_array)))
    }

    fn use_program(&mut self, program: ShaderId) {
        let program = NonZeroU32::new(program).map(glow::NativeProgram);
        unsafe {
            self.gl.use_program(program);
        }
        self.current_program = program;
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<&dyn VertexArray>) {
        unsafe {
            self.gl.bind_vertex_array(vertex_array.and_then(GlVertexArray::native));
        }
    }

    fn set_point_size(&mut self, size: f32) {
        let Some(program) = self.current_program else { return };
        let gl = &self.gl;
        let location = self.point_size_locations.get_or_lookup(program.0.get(), || unsafe {
            gl.get_uniform_location(program, POINT_SIZE_UNIFORM)
        });
        unsafe {
            self.gl.uniform_1_f32(location.as_ref(), size);
        }
    }

    fn set_line_width(&mut self, width: f32) {
        unsafe {
            self.gl.line_width(width);
        }
    }

    fn set_patch_vertices(&mut self, count: u32) {
        unsafe {
            self.gl.patch_parameter_i32(glow::PATCH_VERTICES, count as i32);
        }
        check_errors(&self.gl, "glPatchParameteri");
    }

    fn draw(&mut self, topology: PrimitiveTopology, vertex_count: u32) {
        unsafe {
            self.gl.draw_arrays(topology_to_gl(topology), 0, vertex_count as i32);
        }
        check_errors(&self.gl, "glDrawArrays");
    }

    fn draw_indexed(&mut self, topology: PrimitiveTopology, index_count: u32) {
        unsafe {
            self.gl.draw_elements(topology_to_gl(topology), index_count as i32, glow::UNSIGNED_INT, 0);
        }
        check_errors(&self.gl, "glDrawElements");
    }
}

#[cfg(test)]
#[path = "gl_graphics_device_tests.rs"]
mod tests;
