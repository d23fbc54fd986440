/*!
# Prism 3D Engine - OpenGL backend

Implements the engine's `GraphicsDevice`, `Buffer`, `VertexArray`, `Shader`,
`Framebuffer` and `Texture` traits on top of `glow` (OpenGL 4.x core).

Context creation is left to the application (e.g. glutin with a winit
window); every type here takes the shared `Rc<glow::Context>`.

Enable the `gl-error-checks` feature to drain and log `glGetError` after
each checked call.
*/

mod gl_format;
mod gl_debug;
mod gl_buffer;
mod gl_shader;
mod gl_graphics_device;
mod gl_framebuffer;
mod gl_texture;

#[cfg(test)]
mod test_logger;

pub use gl_buffer::{GlBuffer, GlVertexArray};
pub use gl_shader::{GlShader, ShaderPaths, ShaderSources};
pub use gl_graphics_device::{GlGraphicsDevice, POINT_SIZE_UNIFORM};
pub use gl_framebuffer::{FramebufferConfig, GlFramebuffer, GlScreenFramebuffer};
pub use gl_texture::GlTexture;

// Re-export glow so applications build the context with the same version
pub use glow;
