//! Camera module - fly camera driven by keyboard and mouse input.

mod camera;

pub use camera::{
    Camera, CameraKey,
    LIMIT_EPSILON, LIMIT_PITCH_MAX, SENSITIVITY_ROTATION, SENSITIVITY_TRANSLATION,
};
