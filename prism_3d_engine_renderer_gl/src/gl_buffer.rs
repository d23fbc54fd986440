/// GlBuffer / GlVertexArray - OpenGL implementations of the buffer traits

use std::cell::Cell;
use std::num::NonZeroU32;
use std::rc::Rc;
use glow::HasContext;
use prism_3d_engine::prism3d::render::{Buffer, BufferKind, BufferUsage, VertexArray};
use prism_3d_engine::prism3d::Result;
use crate::gl_debug::check_errors;
use crate::gl_format::buffer_usage_to_gl;

/// OpenGL buffer object
///
/// Uploads go through GL_COPY_WRITE_BUFFER so updating an index buffer never
/// touches the element binding of whichever vertex array is bound.
pub struct GlBuffer {
    gl: Rc<glow::Context>,
    pub(crate) buffer: glow::Buffer,
    kind: BufferKind,
    size: Cell<u64>,
}

impl GlBuffer {
    pub(crate) fn new(gl: Rc<glow::Context>, buffer: glow::Buffer, kind: BufferKind) -> Self {
        Self { gl, buffer, kind, size: Cell::new(0) }
    }

    /// Recover the GL name of a buffer created by this backend
    pub(crate) fn native(buffer: &dyn Buffer) -> Option<glow::Buffer> {
        NonZeroU32::new(buffer.id()).map(glow::NativeBuffer)
    }
}

impl Buffer for GlBuffer {
    fn id(&self) -> u32 {
        self.buffer.0.get()
    }

    fn kind(&self) -> BufferKind {
        self.kind
    }

    fn size(&self) -> u64 {
        self.size.get()
    }

    fn update(&self, data: &[u8], usage: BufferUsage) -> Result<()> {
        unsafe {
            self.gl.bind_buffer(glow::COPY_WRITE_BUFFER, Some(self.buffer));
            self.gl.buffer_data_u8_slice(glow::COPY_WRITE_BUFFER, data, buffer_usage_to_gl(usage));
            self.gl.bind_buffer(glow::COPY_WRITE_BUFFER, None);
        }
        check_errors(&self.gl, "glBufferData");
        self.size.set(data.len() as u64);
        Ok(())
    }
}

impl Drop for GlBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.buffer);
        }
    }
}

/// OpenGL vertex array object
pub struct GlVertexArray {
    gl: Rc<glow::Context>,
    pub(crate) vertex_array: glow::VertexArray,
}

impl GlVertexArray {
    pub(crate) fn new(gl: Rc<glow::Context>, vertex_array: glow::VertexArray) -> Self {
        Self { gl, vertex_array }
    }

    pub(crate) fn native(vertex_array: &dyn VertexArray) -> Option<glow::VertexArray> {
        NonZeroU32::new(vertex_array.id()).map(glow::NativeVertexArray)
    }
}

impl VertexArray for GlVertexArray {
    fn id(&self) -> u32 {
        self.vertex_array.0.get()
    }
}

impl Drop for GlVertexArray {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vertex_array);
        }
    }
}
