//! Input module - keyboard state and mouse movement fed to the scene camera.

mod keyboard;
mod input_state;

pub use keyboard::{KeyboardState, CameraMovement};
pub use input_state::InputState;
