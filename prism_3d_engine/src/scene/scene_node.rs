/// SceneNode - places a shared object in the world.
///
/// The node owns a transform (position + rotation) and a reference-counted
/// handle to the object. Several nodes may wrap the same object to draw it
/// at several places without copying its data.

use std::rc::Rc;
use glam::{Mat4, Vec3};
use crate::utils::{IdAllocator, NodeId};

pub struct SceneNode<T: ?Sized> {
    id: NodeId,
    object: Rc<T>,
    position: Vec3,
    rotation: Mat4,
}

impl<T: ?Sized> SceneNode<T> {
    /// Wrap `object` at the origin with identity rotation
    pub fn new(object: Rc<T>, ids: &IdAllocator) -> Self {
        Self {
            id: ids.next(),
            object,
            position: Vec3::ZERO,
            rotation: Mat4::IDENTITY,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Shared handle to the wrapped object
    pub fn object(&self) -> &Rc<T> {
        &self.object
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Mat4 {
        self.rotation
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Mat4) {
        self.rotation = rotation;
    }

    /// Move relative to the current position
    pub fn move_by(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate about `axis` by `angle` degrees (applied after the current rotation)
    pub fn rotate_deg(&mut self, axis: Vec3, angle: f32) {
        self.rotate_rad(axis, angle.to_radians());
    }

    /// Rotate about `axis` by `angle` radians (applied after the current rotation)
    pub fn rotate_rad(&mut self, axis: Vec3, angle: f32) {
        self.rotation *= Mat4::from_axis_angle(axis.normalize(), angle);
    }

    /// translate(position) * rotation
    pub fn calculate_model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * self.rotation
    }
}

impl<T: ?Sized> Clone for SceneNode<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            object: Rc::clone(&self.object),
            position: self.position,
            rotation: self.rotation,
        }
    }
}

/// Nodes compare by identifier only
impl<T: ?Sized> PartialEq for SceneNode<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: ?Sized> Eq for SceneNode<T> {}

#[cfg(test)]
#[path = "scene_node_tests.rs"]
mod tests;
