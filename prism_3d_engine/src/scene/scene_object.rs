/// SceneObject trait - anything the scene can draw.
///
/// An object knows its material, which shader program draws it (the same id
/// routes it to a framebuffer), and how to issue its own draw call.
/// `configure_shader` is the shared first half of every draw: bind the
/// program, apply the scene configuration once per frame, then apply the
/// object configuration.

use std::rc::Rc;
use crate::error::Result;
use crate::renderer::{GraphicsDevice, ShaderId};
use crate::resource::Material;
use crate::shading::{ShaderConfiguration, ShaderManager};

/// Debug name given to objects that were never named
pub const UNNAMED_OBJECT: &str = "MISSING_NAME";

// ===== DRAW SETTINGS =====

/// Fixed-function parameters applied per draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Point size for point topology
    pub point_size: f32,
    /// Line width for line topologies
    pub line_width: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            point_size: 8.0,
            line_width: 3.0,
        }
    }
}

/// Everything a draw pass needs from the render context
pub struct DrawContext<'a> {
    pub device: &'a mut dyn GraphicsDevice,
    pub shaders: &'a mut ShaderManager,
    pub settings: RenderSettings,
}

impl<'a> DrawContext<'a> {
    pub fn new(device: &'a mut dyn GraphicsDevice, shaders: &'a mut ShaderManager) -> Self {
        Self {
            device,
            shaders,
            settings: RenderSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }
}

// ===== SCENE OBJECT =====

pub trait SceneObject {
    /// Draw the object with the given configurations
    ///
    /// `object_configuration` is fresh for this object and may be extended
    /// (e.g. with material uniforms) before it is applied.
    fn draw(
        &self,
        ctx: &mut DrawContext,
        scene_configuration: &ShaderConfiguration,
        object_configuration: &mut ShaderConfiguration,
    ) -> Result<()>;

    fn material(&self) -> &Rc<Material>;

    fn set_material(&mut self, material: Rc<Material>);

    /// Program id drawing this object (0 until assigned)
    fn shader_id(&self) -> ShaderId;

    fn set_shader_id(&mut self, id: ShaderId);

    fn debug_name(&self) -> &str;

    fn set_debug_name(&mut self, name: &str);

    /// Bind this object's program and apply both configurations
    ///
    /// The scene configuration is applied only if the program has not been
    /// configured this frame; the object configuration always is.
    ///
    /// # Errors
    ///
    /// `Error::InvalidReference` if the shader id is not registered.
    fn configure_shader(
        &self,
        ctx: &mut DrawContext,
        scene_configuration: &ShaderConfiguration,
        object_configuration: &ShaderConfiguration,
    ) -> Result<()> {
        let shader_id = self.shader_id();
        ctx.shaders.use_shader(&mut *ctx.device, shader_id);
        ctx.shaders.configure_shader(scene_configuration, shader_id, false)?;
        ctx.shaders.configure_shader(object_configuration, shader_id, true)?;
        Ok(())
    }
}
