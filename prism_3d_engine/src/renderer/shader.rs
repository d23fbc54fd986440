/// Shader program trait

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

/// Stable shader-program identifier (the backend's program name)
pub type ShaderId = u32;

/// A linked shader program exposing uniforms by name
///
/// Implemented by backend-specific programs (e.g. the GL backend's GlShader).
/// Setters target the program's uniform state; unknown names are ignored by
/// the backend the same way the driver ignores location -1.
pub trait Shader {
    /// Program identifier, used as the registry and framebuffer-routing key
    fn id(&self) -> ShaderId;

    /// Human readable name for logs
    fn debug_name(&self) -> &str {
        ""
    }

    fn set_bool(&self, name: &str, value: bool);
    fn set_int(&self, name: &str, value: i32);
    fn set_uint(&self, name: &str, value: u32);
    fn set_float(&self, name: &str, value: f32);
    fn set_mat3(&self, name: &str, value: &Mat3);
    fn set_mat4(&self, name: &str, value: &Mat4);
    fn set_vec2(&self, name: &str, value: Vec2);
    fn set_vec3(&self, name: &str, value: Vec3);
    fn set_vec4(&self, name: &str, value: Vec4);
}
