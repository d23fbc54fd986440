//! Shading module
//!
//! Uniform value batching (`ShaderConfiguration`) and the per-context shader
//! registry (`ShaderManager`).

pub mod shader_configuration;
pub mod shader_manager;

pub use shader_configuration::{ShaderConfiguration, DEFAULT_PATCH_VERTICES};
pub use shader_manager::ShaderManager;
