/// Camera - yaw/pitch fly camera with clamped angles.
///
/// The camera keeps an orthonormal frame (u, v, w) where `w` points from the
/// look target back to the eye. Rotation is expressed as yaw/pitch relative
/// to a reference frame fixed at construction, so repeated mouse input never
/// accumulates drift in the up direction.

use std::f32::consts::FRAC_PI_2;
use glam::{Mat4, Vec3};
use slotmap::new_key_type;

new_key_type! {
    /// Stable key of a camera registered in a scene
    pub struct CameraKey;
}

/// Angle limits are pulled in by this much so the frame never degenerates
pub const LIMIT_EPSILON: f32 = 1.0e-4;
/// Largest allowed pitch limit
pub const LIMIT_PITCH_MAX: f32 = FRAC_PI_2;
/// Base rotation factor applied to mouse offsets
pub const SENSITIVITY_ROTATION: f32 = 0.001;
/// Base translation factor applied to movement directions
pub const SENSITIVITY_TRANSLATION: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    up_vector: Vec3,
    w: Vec3,
    ref_x: Vec3,
    ref_z: Vec3,
    pitch: f32,
    yaw: f32,
    pitch_limit: f32,
    yaw_limit: f32,
    sensitivity_rotation_user: f32,
    sensitivity_translation_user: f32,
}

impl Camera {
    /// Camera at `position` looking at `target`
    ///
    /// The initial view direction defines yaw 0; pitch starts at the angle
    /// between the view direction and the horizon. Pitch is limited to just
    /// under 90° and yaw is unlimited.
    pub fn new(position: Vec3, up_vector: Vec3, target: Vec3) -> Self {
        let up_vector = up_vector.normalize();
        let w = (position - target).normalize();

        let mut camera = Self {
            position,
            up_vector,
            w,
            ref_x: Vec3::ZERO,
            ref_z: Vec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            pitch_limit: 0.0,
            yaw_limit: 0.0,
            sensitivity_rotation_user: 1.0,
            sensitivity_translation_user: 1.0,
        };
        camera.set_pitch_limit(-1.0);
        camera.set_yaw_limit(-1.0);
        camera.set_pitch(w.dot(up_vector).clamp(-1.0, 1.0).asin());
        camera.set_yaw(0.0);

        // horizontal projection of w; falls back to any horizontal axis when
        // looking straight up or down
        camera.ref_x = (w - w.dot(up_vector) * up_vector)
            .try_normalize()
            .unwrap_or_else(|| up_vector.any_orthonormal_vector());
        camera.ref_z = up_vector.cross(camera.ref_x).normalize();
        camera
    }

    // ===== MOVEMENT =====

    /// Rotate by mouse offsets (pixels)
    pub fn rotate(&mut self, yaw_offset: f32, pitch_offset: f32) {
        self.rotate_with_sensitivity(yaw_offset, pitch_offset, 1.0);
    }

    /// Rotate by mouse offsets scaled by an extra per-call factor
    pub fn rotate_with_sensitivity(&mut self, yaw_offset: f32, pitch_offset: f32, sensitivity: f32) {
        let scale = sensitivity * SENSITIVITY_ROTATION * self.sensitivity_rotation_user;
        self.set_pitch(self.pitch - pitch_offset * scale);
        self.set_yaw(self.yaw - yaw_offset * scale);
        self.build_w();
    }

    /// Move along `direction`
    pub fn translate(&mut self, direction: Vec3) {
        self.translate_with_sensitivity(direction, 1.0);
    }

    pub fn translate_with_sensitivity(&mut self, direction: Vec3, sensitivity: f32) {
        self.position += direction * sensitivity * SENSITIVITY_TRANSLATION * self.sensitivity_translation_user;
    }

    // ===== GETTERS =====

    /// Right-handed look-at view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position - self.w, self.up_vector)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn up_vector(&self) -> Vec3 {
        self.up_vector
    }

    /// Back vector (opposite of the view direction)
    pub fn w(&self) -> Vec3 {
        self.w
    }

    /// Right vector
    pub fn u(&self) -> Vec3 {
        self.up_vector.cross(self.w).try_normalize().unwrap_or(self.ref_z)
    }

    /// Camera-space up vector
    pub fn v(&self) -> Vec3 {
        self.w.cross(self.u()).normalize()
    }

    /// View direction (-w)
    pub fn view_direction(&self) -> Vec3 {
        -self.w
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch_limit(&self) -> f32 {
        self.pitch_limit
    }

    pub fn yaw_limit(&self) -> f32 {
        self.yaw_limit
    }

    // ===== TUNABLES =====

    /// Pitch limit in radians; negative selects the maximum (just under 90°)
    pub fn set_pitch_limit(&mut self, limit: f32) {
        let limit = if limit < 0.0 { LIMIT_PITCH_MAX } else { limit.min(LIMIT_PITCH_MAX) };
        self.pitch_limit = (limit - LIMIT_EPSILON).max(0.0);
    }

    /// Yaw limit in radians; negative (or zero) disables yaw clamping
    pub fn set_yaw_limit(&mut self, limit: f32) {
        self.yaw_limit = limit - LIMIT_EPSILON;
    }

    pub fn set_rotation_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity_rotation_user = sensitivity;
    }

    pub fn set_translation_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity_translation_user = sensitivity;
    }

    // ===== INTERNALS =====

    fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.yaw = if self.yaw_limit < 0.0 {
            yaw
        } else {
            yaw.clamp(-self.yaw_limit, self.yaw_limit)
        };
    }

    fn build_w(&mut self) {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();

        self.w = cos_pitch * cos_yaw * self.ref_x
            + sin_pitch * self.up_vector
            + cos_pitch * sin_yaw * self.ref_z;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
