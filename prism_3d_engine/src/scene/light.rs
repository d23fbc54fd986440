//! Scene lights.
//!
//! Lights carry only their photometric values. Placement comes from the
//! `SceneNode` that wraps them.

use glam::{Mat4, Vec3};

/// Omnidirectional light at its node's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    color: Vec3,
    power: f32,
}

impl PointLight {
    pub fn new(color: Vec3, power: f32) -> Self {
        Self { color, power }
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn power(&self) -> f32 {
        self.power
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vec3::ONE, 1.0)
    }
}

/// Parallel light; shines along local -y, oriented by its node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    power: f32,
}

impl DirectionalLight {
    /// Direction in the light's local space
    pub const LOCAL_DIRECTION: Vec3 = Vec3::new(0.0, -1.0, 0.0);

    pub fn new(power: f32) -> Self {
        Self { power }
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn direction(&self) -> Vec3 {
        Self::LOCAL_DIRECTION
    }

    /// Direction after applying `model` (translation has no effect)
    pub fn world_direction(&self, model: &Mat4) -> Vec3 {
        (*model * Self::LOCAL_DIRECTION.extend(0.0)).truncate()
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
