/// ShaderManager - shader registry plus per-frame configuration tracking
///
/// One manager per render context, created by the application and passed to
/// the scene through `DrawContext`. It remembers which program is bound so
/// redundant binds are skipped, and which shaders already received the
/// scene-level configuration this frame.

use std::rc::Rc;
use rustc_hash::{FxHashMap, FxHashSet};
use crate::error::{Error, Result, log_error};
use crate::renderer::{GraphicsDevice, Shader, ShaderId};
use crate::shading::ShaderConfiguration;
use crate::{engine_debug, engine_trace};

pub struct ShaderManager {
    /// Registered shaders by program id
    registered_shaders: FxHashMap<ShaderId, Rc<dyn Shader>>,
    /// Shaders configured since the last `clear_draw_configurations`
    configured_shaders: FxHashSet<ShaderId>,
    /// Currently bound program (0 = none)
    active_shader: ShaderId,
}

impl Default for ShaderManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderManager {
    pub fn new() -> Self {
        Self {
            registered_shaders: FxHashMap::default(),
            configured_shaders: FxHashSet::default(),
            active_shader: 0,
        }
    }

    /// Register a shader under its program id
    ///
    /// A shader already registered under the same id is replaced and returned.
    pub fn register_shader(&mut self, shader: Rc<dyn Shader>) -> Option<Rc<dyn Shader>> {
        let id = shader.id();
        engine_debug!("prism3d::ShaderManager", "Registered shader {} '{}'", id, shader.debug_name());
        self.registered_shaders.insert(id, shader)
    }

    /// Remove a shader from the registry
    pub fn unregister_shader(&mut self, id: ShaderId) -> Option<Rc<dyn Shader>> {
        self.configured_shaders.remove(&id);
        self.registered_shaders.remove(&id)
    }

    /// Bind program `id` unless it is already the active one
    pub fn use_shader(&mut self, device: &mut dyn GraphicsDevice, id: ShaderId) {
        if self.active_shader != id {
            device.use_program(id);
            self.active_shader = id;
        }
    }

    /// Push `configuration` into shader `id`
    ///
    /// With `force == false` the configuration is applied only the first time
    /// the shader is configured this frame. Returns whether it was applied.
    ///
    /// # Errors
    ///
    /// `Error::InvalidReference` if `id` was never registered.
    pub fn configure_shader(
        &mut self,
        configuration: &ShaderConfiguration,
        id: ShaderId,
        force: bool,
    ) -> Result<bool> {
        if !force && self.configured_shaders.contains(&id) {
            return Ok(false);
        }

        let shader = self.registered_shaders.get(&id).ok_or_else(|| {
            log_error(
                "prism3d::ShaderManager",
                Error::InvalidReference(format!("shader {} was used but never registered", id)),
            )
        })?;

        engine_trace!("prism3d::ShaderManager",
            "Configuring shader {} with {} values (force={})", id, configuration.len(), force);
        configuration.load_into_shader(shader.as_ref());
        self.configured_shaders.insert(id);
        Ok(true)
    }

    /// Forget which shaders were configured (start of a frame)
    pub fn clear_draw_configurations(&mut self) {
        self.configured_shaders.clear();
    }

    /// Registered shader by id
    pub fn shader(&self, id: ShaderId) -> Option<&Rc<dyn Shader>> {
        self.registered_shaders.get(&id)
    }

    pub fn is_registered(&self, id: ShaderId) -> bool {
        self.registered_shaders.contains_key(&id)
    }

    /// Whether shader `id` was configured since the last clear
    pub fn is_configured(&self, id: ShaderId) -> bool {
        self.configured_shaders.contains(&id)
    }

    /// Currently bound program id (0 = none)
    pub fn active_shader(&self) -> ShaderId {
        self.active_shader
    }

    pub fn shader_count(&self) -> usize {
        self.registered_shaders.len()
    }
}

#[cfg(test)]
#[path = "shader_manager_tests.rs"]
mod tests;
