//! Scene module
//!
//! Scene graph (nodes wrapping shared objects and lights), the drawable
//! object trait with its GPU mesh implementation, and the scene draw pass.

mod scene_node;
mod scene_object;
mod scene_mesh;
mod light;
mod scene;

pub use scene_node::SceneNode;
pub use scene_object::{SceneObject, DrawContext, RenderSettings, UNNAMED_OBJECT};
pub use scene_mesh::SceneMesh;
pub use light::{PointLight, DirectionalLight};
pub use scene::{
    Scene, SharedObject, ObjectNode, PointLightNode, DirectionalLightNode,
};
