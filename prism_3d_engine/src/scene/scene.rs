/// Scene - objects, lights and cameras drawn in one pass.
///
/// Objects and lights are wrapped in `SceneNode`s that carry their world
/// placement. Cameras live in a SlotMap with stable keys; one of them is
/// always active and feeds the view uniforms.
///
/// A draw pass writes the scene-level configuration (camera and lights),
/// then routes every object to the framebuffer mapped to its shader id.
/// The scene configuration reaches each shader once per pass, before the
/// first object drawn with it.

use std::cell::RefCell;
use std::rc::Rc;
use glam::{Mat3, Vec3};
use slotmap::SlotMap;
use crate::camera::{Camera, CameraKey};
use crate::error::{Error, Result, log_error};
use crate::input::{CameraMovement, KeyboardState};
use crate::renderer::FramebufferMap;
use crate::scene::{DirectionalLight, DrawContext, PointLight, SceneNode, SceneObject};
use crate::shading::ShaderConfiguration;
use crate::utils::{IdAllocator, NodeId};
use crate::{engine_debug, engine_err, engine_trace};

/// Object shared between nodes (and possibly scenes)
pub type SharedObject = Rc<RefCell<dyn SceneObject>>;
/// Node placing a shared scene object
pub type ObjectNode = SceneNode<RefCell<dyn SceneObject>>;
pub type PointLightNode = SceneNode<PointLight>;
pub type DirectionalLightNode = SceneNode<DirectionalLight>;

/// Default camera placement used by `Scene::with_default_camera`
const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, -3.0);
const DEFAULT_CAMERA_TARGET: Vec3 = Vec3::new(0.0, 0.0, 1.0);

pub struct Scene {
    /// Node id source, shared with other scenes that must not collide
    ids: Rc<IdAllocator>,
    /// Object nodes in draw order
    object_nodes: Vec<ObjectNode>,
    point_light_nodes: Vec<PointLightNode>,
    directional_light_nodes: Vec<DirectionalLightNode>,
    cameras: SlotMap<CameraKey, Camera>,
    /// Always a key of `cameras`
    active_camera: CameraKey,
}

impl Scene {
    /// Create an empty scene viewed through `camera`
    pub fn new(camera: Camera, ids: Rc<IdAllocator>) -> Self {
        let mut cameras = SlotMap::with_key();
        let active_camera = cameras.insert(camera);
        Self {
            ids,
            object_nodes: Vec::new(),
            point_light_nodes: Vec::new(),
            directional_light_nodes: Vec::new(),
            cameras,
            active_camera,
        }
    }

    /// Create an empty scene with a camera at (0, 0, -3) looking down +z
    pub fn with_default_camera(ids: Rc<IdAllocator>) -> Self {
        Self::new(
            Camera::new(DEFAULT_CAMERA_POSITION, Vec3::Y, DEFAULT_CAMERA_TARGET),
            ids,
        )
    }

    pub fn ids(&self) -> &Rc<IdAllocator> {
        &self.ids
    }

    // ===== NODES =====

    /// Place `object` in the scene at the origin
    ///
    /// The same object may be added several times; each call creates a new
    /// node with its own id and transform.
    pub fn add_object(&mut self, object: SharedObject) -> NodeId {
        let node = SceneNode::new(object, &self.ids);
        let id = node.id();
        self.object_nodes.push(node);
        id
    }

    /// Remove an object node, keeping the order of the others
    pub fn remove_object(&mut self, id: NodeId) -> Option<ObjectNode> {
        let index = self.object_nodes.iter().position(|node| node.id() == id)?;
        Some(self.object_nodes.remove(index))
    }

    pub fn add_point_light(&mut self, light: Rc<PointLight>) -> NodeId {
        let node = SceneNode::new(light, &self.ids);
        let id = node.id();
        self.point_light_nodes.push(node);
        id
    }

    /// Add a directional light; only the first one added lights the scene
    pub fn add_directional_light(&mut self, light: Rc<DirectionalLight>) -> NodeId {
        let node = SceneNode::new(light, &self.ids);
        let id = node.id();
        self.directional_light_nodes.push(node);
        id
    }

    pub fn object_node(&self, id: NodeId) -> Option<&ObjectNode> {
        self.object_nodes.iter().find(|node| node.id() == id)
    }

    pub fn object_node_mut(&mut self, id: NodeId) -> Option<&mut ObjectNode> {
        self.object_nodes.iter_mut().find(|node| node.id() == id)
    }

    pub fn point_light_node(&self, id: NodeId) -> Option<&PointLightNode> {
        self.point_light_nodes.iter().find(|node| node.id() == id)
    }

    pub fn point_light_node_mut(&mut self, id: NodeId) -> Option<&mut PointLightNode> {
        self.point_light_nodes.iter_mut().find(|node| node.id() == id)
    }

    pub fn directional_light_node(&self, id: NodeId) -> Option<&DirectionalLightNode> {
        self.directional_light_nodes.iter().find(|node| node.id() == id)
    }

    pub fn directional_light_node_mut(&mut self, id: NodeId) -> Option<&mut DirectionalLightNode> {
        self.directional_light_nodes.iter_mut().find(|node| node.id() == id)
    }

    /// Object nodes in draw order
    pub fn object_nodes(&self) -> &[ObjectNode] {
        &self.object_nodes
    }

    pub fn object_count(&self) -> usize {
        self.object_nodes.len()
    }

    pub fn point_light_count(&self) -> usize {
        self.point_light_nodes.len()
    }

    pub fn directional_light_count(&self) -> usize {
        self.directional_light_nodes.len()
    }

    // ===== CAMERAS =====

    /// Register a camera without activating it
    pub fn add_camera(&mut self, camera: Camera) -> CameraKey {
        self.cameras.insert(camera)
    }

    /// Register `camera` and make it the active one
    pub fn set_active_camera(&mut self, camera: Camera) -> CameraKey {
        let key = self.cameras.insert(camera);
        self.active_camera = key;
        key
    }

    /// Activate a camera registered earlier
    ///
    /// # Errors
    ///
    /// `Error::InvalidReference` if `key` does not belong to this scene.
    pub fn activate_camera(&mut self, key: CameraKey) -> Result<()> {
        if !self.cameras.contains_key(key) {
            return Err(log_error(
                "prism3d::Scene",
                Error::InvalidReference(format!("camera {:?} is not registered in this scene", key)),
            ));
        }
        self.active_camera = key;
        Ok(())
    }

    pub fn camera(&self, key: CameraKey) -> Option<&Camera> {
        self.cameras.get(key)
    }

    pub fn camera_mut(&mut self, key: CameraKey) -> Option<&mut Camera> {
        self.cameras.get_mut(key)
    }

    pub fn active_camera(&self) -> &Camera {
        &self.cameras[self.active_camera]
    }

    pub fn active_camera_mut(&mut self) -> &mut Camera {
        &mut self.cameras[self.active_camera]
    }

    pub fn active_camera_key(&self) -> CameraKey {
        self.active_camera
    }

    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    // ===== INPUT =====

    /// Move the active camera with WASD
    pub fn process_input<K: KeyboardState + ?Sized>(&mut self, keys: &K) {
        let movement = CameraMovement::from_keyboard(keys);
        if movement.is_empty() {
            return;
        }

        let camera = self.active_camera_mut();
        let (u, w) = (camera.u(), camera.w());
        if movement.contains(CameraMovement::LEFT) {
            camera.translate(-u);
        }
        if movement.contains(CameraMovement::RIGHT) {
            camera.translate(u);
        }
        if movement.contains(CameraMovement::FORWARD) {
            camera.translate(-w);
        }
        if movement.contains(CameraMovement::BACKWARD) {
            camera.translate(w);
        }
    }

    /// Rotate the active camera by a mouse offset (pixels)
    pub fn process_mouse(&mut self, x_offset: f32, y_offset: f32) {
        self.active_camera_mut().rotate(x_offset, y_offset);
    }

    // ===== DRAW =====

    /// Write camera and light uniforms into `configuration`
    ///
    /// Only the first directional light is written. Without one, only
    /// `useDirectionalLight = false` is set.
    pub fn write_scene_configuration(&self, configuration: &mut ShaderConfiguration) {
        let camera = self.active_camera();
        configuration.set_mat4("view", camera.view_matrix());
        configuration.set_vec3("camera_position", camera.position());
        configuration.set_vec3("camera_view_dir", camera.view_direction());

        for (i, node) in self.point_light_nodes.iter().enumerate() {
            let light = node.object();
            configuration.set_vec3(&format!("pointLight_position[{}]", i), node.position());
            configuration.set_vec3(&format!("pointLight_color[{}]", i), light.color());
            configuration.set_float(&format!("pointLight_power[{}]", i), light.power());
        }
        configuration.set_uint("pointLight_count", self.point_light_nodes.len() as u32);

        match self.directional_light_nodes.first() {
            Some(node) => {
                let light = node.object();
                let direction = light.world_direction(&node.calculate_model_matrix());
                configuration.set_vec3("directionalLight_direction", direction);
                configuration.set_float("directionalLight_power", light.power());
                configuration.set_bool("useDirectionalLight", true);
            }
            None => configuration.set_bool("useDirectionalLight", false),
        }
    }

    /// Draw every object into the framebuffer mapped to its shader id
    ///
    /// `configuration` receives the scene uniforms on top of whatever the
    /// caller already put there (projection, patch vertex count). Objects
    /// whose shader id has no framebuffer are skipped.
    ///
    /// # Errors
    ///
    /// Fails on the first object whose draw fails (e.g. an unregistered
    /// shader id), or if an object is mutably borrowed elsewhere.
    pub fn draw(
        &self,
        ctx: &mut DrawContext,
        configuration: &mut ShaderConfiguration,
        framebuffers: &FramebufferMap,
    ) -> Result<()> {
        ctx.shaders.clear_draw_configurations();
        self.write_scene_configuration(configuration);

        let mut drawn = 0;
        for node in &self.object_nodes {
            let object = node.object().try_borrow().map_err(|_| {
                engine_err!("prism3d::Scene", "Object node {} is borrowed mutably during draw", node.id())
            })?;

            let Some(framebuffer) = framebuffers.get(&object.shader_id()) else {
                engine_debug!("prism3d::Scene",
                    "Skipping '{}' ({}): no framebuffer for shader {}",
                    object.debug_name(), node.id(), object.shader_id());
                continue;
            };
            framebuffer.bind();

            let model = node.calculate_model_matrix();
            let mut object_configuration = ShaderConfiguration::new();
            object_configuration.set_mat4("model", model);
            object_configuration.set_mat3("model_normal", Mat3::from_mat4(model.inverse().transpose()));

            object.draw(ctx, configuration, &mut object_configuration)?;
            drawn += 1;
        }

        engine_trace!("prism3d::Scene", "Drew {}/{} objects", drawn, self.object_nodes.len());
        Ok(())
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
