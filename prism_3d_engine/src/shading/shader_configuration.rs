/// ShaderConfiguration - a bag of named, typed uniform values
///
/// Values are kept per kind (bool, int, uint, float, mat3, mat4, vec2, vec3,
/// vec4). Setting a name again overwrites it; reading an unset name returns
/// the kind's default. `load_into_shader` pushes every value in one pass,
/// kind by kind, in insertion order within a kind.

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;
use crate::renderer::Shader;

/// Default vertices per patch
pub const DEFAULT_PATCH_VERTICES: u32 = 3;

// ===== UNIFORM MAP =====

/// Insertion-ordered name → value map
#[derive(Debug, Clone)]
struct UniformMap<T> {
    entries: Vec<(String, T)>,
    names: FxHashMap<String, usize>,
}

impl<T: Copy> UniformMap<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            names: FxHashMap::default(),
        }
    }

    fn set(&mut self, name: &str, value: T) {
        match self.names.get(name) {
            Some(&index) => self.entries[index].1 = value,
            None => {
                self.names.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), value));
            }
        }
    }

    fn get(&self, name: &str) -> Option<T> {
        self.names.get(name).map(|&index| self.entries[index].1)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.names.clear();
    }
}

// ===== SHADER CONFIGURATION =====

#[derive(Debug, Clone)]
pub struct ShaderConfiguration {
    bools: UniformMap<bool>,
    ints: UniformMap<i32>,
    uints: UniformMap<u32>,
    floats: UniformMap<f32>,
    mat4s: UniformMap<Mat4>,
    mat3s: UniformMap<Mat3>,
    vec4s: UniformMap<Vec4>,
    vec3s: UniformMap<Vec3>,
    vec2s: UniformMap<Vec2>,
    patch_vertices: u32,
}

impl Default for ShaderConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderConfiguration {
    pub fn new() -> Self {
        Self {
            bools: UniformMap::new(),
            ints: UniformMap::new(),
            uints: UniformMap::new(),
            floats: UniformMap::new(),
            mat4s: UniformMap::new(),
            mat3s: UniformMap::new(),
            vec4s: UniformMap::new(),
            vec3s: UniformMap::new(),
            vec2s: UniformMap::new(),
            patch_vertices: DEFAULT_PATCH_VERTICES,
        }
    }

    /// Push every stored value into `shader`
    ///
    /// Order: bool, int, uint, float, mat4, mat3, vec4, vec3, vec2.
    pub fn load_into_shader(&self, shader: &dyn Shader) {
        for (name, value) in self.bools.iter() {
            shader.set_bool(name, value);
        }
        for (name, value) in self.ints.iter() {
            shader.set_int(name, value);
        }
        for (name, value) in self.uints.iter() {
            shader.set_uint(name, value);
        }
        for (name, value) in self.floats.iter() {
            shader.set_float(name, value);
        }
        for (name, value) in self.mat4s.iter() {
            shader.set_mat4(name, &value);
        }
        for (name, value) in self.mat3s.iter() {
            shader.set_mat3(name, &value);
        }
        for (name, value) in self.vec4s.iter() {
            shader.set_vec4(name, value);
        }
        for (name, value) in self.vec3s.iter() {
            shader.set_vec3(name, value);
        }
        for (name, value) in self.vec2s.iter() {
            shader.set_vec2(name, value);
        }
    }

    // ===== SETTERS =====

    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.set(name, value);
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.ints.set(name, value);
    }

    pub fn set_uint(&mut self, name: &str, value: u32) {
        self.uints.set(name, value);
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.floats.set(name, value);
    }

    pub fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.mat4s.set(name, value);
    }

    pub fn set_mat3(&mut self, name: &str, value: Mat3) {
        self.mat3s.set(name, value);
    }

    pub fn set_vec4(&mut self, name: &str, value: Vec4) {
        self.vec4s.set(name, value);
    }

    pub fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.vec3s.set(name, value);
    }

    pub fn set_vec2(&mut self, name: &str, value: Vec2) {
        self.vec2s.set(name, value);
    }

    /// Vertices per patch used by patch topology draws
    pub fn set_patch_vertices(&mut self, count: u32) {
        self.patch_vertices = count;
    }

    // ===== GETTERS (default when unset) =====

    pub fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).unwrap_or(false)
    }

    pub fn get_int(&self, name: &str) -> i32 {
        self.ints.get(name).unwrap_or(0)
    }

    pub fn get_uint(&self, name: &str) -> u32 {
        self.uints.get(name).unwrap_or(0)
    }

    pub fn get_float(&self, name: &str) -> f32 {
        self.floats.get(name).unwrap_or(0.0)
    }

    pub fn get_mat4(&self, name: &str) -> Mat4 {
        self.mat4s.get(name).unwrap_or(Mat4::IDENTITY)
    }

    pub fn get_mat3(&self, name: &str) -> Mat3 {
        self.mat3s.get(name).unwrap_or(Mat3::IDENTITY)
    }

    pub fn get_vec4(&self, name: &str) -> Vec4 {
        self.vec4s.get(name).unwrap_or(Vec4::ZERO)
    }

    pub fn get_vec3(&self, name: &str) -> Vec3 {
        self.vec3s.get(name).unwrap_or(Vec3::ZERO)
    }

    pub fn get_vec2(&self, name: &str) -> Vec2 {
        self.vec2s.get(name).unwrap_or(Vec2::ZERO)
    }

    pub fn patch_vertices(&self) -> u32 {
        self.patch_vertices
    }

    // ===== PRESENCE =====

    pub fn has_bool(&self, name: &str) -> bool {
        self.bools.get(name).is_some()
    }

    pub fn has_float(&self, name: &str) -> bool {
        self.floats.get(name).is_some()
    }

    pub fn has_vec3(&self, name: &str) -> bool {
        self.vec3s.get(name).is_some()
    }

    /// Total number of stored values across all kinds
    pub fn len(&self) -> usize {
        self.bools.len()
            + self.ints.len()
            + self.uints.len()
            + self.floats.len()
            + self.mat4s.len()
            + self.mat3s.len()
            + self.vec4s.len()
            + self.vec3s.len()
            + self.vec2s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all values (patch vertex count is kept)
    pub fn clear(&mut self) {
        self.bools.clear();
        self.ints.clear();
        self.uints.clear();
        self.floats.clear();
        self.mat4s.clear();
        self.mat3s.clear();
        self.vec4s.clear();
        self.vec3s.clear();
        self.vec2s.clear();
    }
}

#[cfg(test)]
#[path = "shader_configuration_tests.rs"]
mod tests;
