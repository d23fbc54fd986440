/// Renderer module - backend-facing traits and descriptors
///
/// The core never talks to a graphics API directly. Backends (e.g. the
/// OpenGL backend crate) implement these traits; tests use the recording
/// mock device.

pub mod graphics_device;
pub mod buffer;
pub mod shader;
pub mod framebuffer;
pub mod texture;
pub mod vertex_layout;

pub use graphics_device::*;
pub use buffer::*;
pub use shader::*;
pub use framebuffer::*;
pub use texture::*;
pub use vertex_layout::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
