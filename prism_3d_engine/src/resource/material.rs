/// Surface material: PBR properties, each a default value with an optional texture.
///
/// A material does not own GPU state beyond the textures it references.
/// At draw time the mesh binds the textures to consecutive texture units and
/// writes the property values into the object's shader configuration:
///
/// ```text
/// material.albedo.value_default   vec3
/// material.albedo.use_texture     bool
/// material.albedo.texture         int (texture unit)
/// ...
/// material.height_scale           float
/// ```

use std::rc::Rc;
use glam::Vec3;
use crate::renderer::Texture;
use crate::shading::ShaderConfiguration;

/// Number of texture slots a material uses (albedo .. opacity)
pub const MATERIAL_TEXTURE_SLOTS: u32 = 7;

// ===== MATERIAL PROPERTY =====

/// One material property: fallback value plus optional texture
#[derive(Clone)]
pub struct MaterialProperty<T> {
    /// Used when no texture is bound
    pub value_default: T,
    /// Texture controlling the property
    pub texture: Option<Rc<dyn Texture>>,
}

impl<T> MaterialProperty<T> {
    pub fn new(value_default: T) -> Self {
        Self { value_default, texture: None }
    }

    pub fn with_texture(value_default: T, texture: Rc<dyn Texture>) -> Self {
        Self { value_default, texture: Some(texture) }
    }

    pub fn uses_texture(&self) -> bool {
        self.texture.is_some()
    }

    fn bind_texture(&self, unit: u32) {
        if let Some(texture) = &self.texture {
            texture.bind(unit);
        }
    }
}

/// Writes a property's default value under `<name>.value_default`
trait PropertyUniform {
    fn write_value(&self, config: &mut ShaderConfiguration, name: &str);
}

impl PropertyUniform for Vec3 {
    fn write_value(&self, config: &mut ShaderConfiguration, name: &str) {
        config.set_vec3(name, *self);
    }
}

impl PropertyUniform for f32 {
    fn write_value(&self, config: &mut ShaderConfiguration, name: &str) {
        config.set_float(name, *self);
    }
}

fn write_property<T: PropertyUniform>(
    config: &mut ShaderConfiguration,
    name: &str,
    property: &MaterialProperty<T>,
    unit: u32,
) {
    property.value_default.write_value(config, &format!("{}.value_default", name));
    config.set_bool(&format!("{}.use_texture", name), property.uses_texture());
    config.set_int(&format!("{}.texture", name), unit as i32);
}

// ===== MATERIAL =====

/// Material resource
#[derive(Clone)]
pub struct Material {
    pub albedo: MaterialProperty<Vec3>,
    pub normal: MaterialProperty<Vec3>,
    pub roughness: MaterialProperty<f32>,
    pub metallic: MaterialProperty<f32>,
    pub ao: MaterialProperty<f32>,
    pub height: MaterialProperty<f32>,
    pub opacity: MaterialProperty<f32>,
    /// Height scale for parallax occlusion and displacement mapping
    pub height_scale: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: MaterialProperty::new(Vec3::ONE),
            normal: MaterialProperty::new(Vec3::Z),
            roughness: MaterialProperty::new(0.3),
            metallic: MaterialProperty::new(0.0),
            ao: MaterialProperty::new(1.0),
            height: MaterialProperty::new(1.0),
            opacity: MaterialProperty::new(1.0),
            height_scale: 1.0,
        }
    }
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every present texture to `first_unit + slot`
    ///
    /// Slots: albedo 0, normal 1, roughness 2, metallic 3, ao 4, height 5,
    /// opacity 6. Properties without a texture leave their unit untouched.
    pub fn bind_textures(&self, first_unit: u32) {
        self.albedo.bind_texture(first_unit);
        self.normal.bind_texture(first_unit + 1);
        self.roughness.bind_texture(first_unit + 2);
        self.metallic.bind_texture(first_unit + 3);
        self.ao.bind_texture(first_unit + 4);
        self.height.bind_texture(first_unit + 5);
        self.opacity.bind_texture(first_unit + 6);
    }

    /// Write all property uniforms under `prefix` (e.g. "material")
    pub fn write_uniforms(&self, config: &mut ShaderConfiguration, prefix: &str, first_unit: u32) {
        write_property(config, &format!("{}.albedo", prefix), &self.albedo, first_unit);
        write_property(config, &format!("{}.normal", prefix), &self.normal, first_unit + 1);
        write_property(config, &format!("{}.roughness", prefix), &self.roughness, first_unit + 2);
        write_property(config, &format!("{}.metallic", prefix), &self.metallic, first_unit + 3);
        write_property(config, &format!("{}.ao", prefix), &self.ao, first_unit + 4);
        write_property(config, &format!("{}.height", prefix), &self.height, first_unit + 5);
        write_property(config, &format!("{}.opacity", prefix), &self.opacity, first_unit + 6);
        config.set_float(&format!("{}.height_scale", prefix), self.height_scale);
    }

    /// Number of properties backed by a texture
    pub fn texture_count(&self) -> usize {
        [
            self.albedo.uses_texture(),
            self.normal.uses_texture(),
            self.roughness.uses_texture(),
            self.metallic.uses_texture(),
            self.ao.uses_texture(),
            self.height.uses_texture(),
            self.opacity.uses_texture(),
        ]
        .iter()
        .filter(|&&used| used)
        .count()
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
