/// Framebuffer trait - a render target the scene draws into
///
/// Scenes route objects to framebuffers by shader id (see `FramebufferMap`),
/// so one draw pass can fill several targets at once.

use std::rc::Rc;
use rustc_hash::FxHashMap;
use crate::renderer::ShaderId;

/// Framebuffer identifier (0 is the window's default framebuffer in GL)
pub type FramebufferId = u32;

/// Render target abstraction
pub trait Framebuffer {
    /// Stable identifier
    fn id(&self) -> FramebufferId;

    /// Make this framebuffer the active render target
    fn bind(&self);

    /// Human readable name for logs
    fn debug_name(&self) -> &str {
        ""
    }
}

/// Shader id → framebuffer routing table consumed by `Scene::draw`
///
/// Objects whose shader id has no entry are skipped for the pass.
pub type FramebufferMap = FxHashMap<ShaderId, Rc<dyn Framebuffer>>;
