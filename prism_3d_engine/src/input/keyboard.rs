//! Keyboard state queries and camera movement mapping.

use std::collections::HashSet;
use std::hash::BuildHasher;
use bitflags::bitflags;
use winit::keyboard::KeyCode;

/// Read-only view of which keys are held this frame
pub trait KeyboardState {
    fn is_pressed(&self, key: KeyCode) -> bool;
}

impl<S: BuildHasher> KeyboardState for HashSet<KeyCode, S> {
    fn is_pressed(&self, key: KeyCode) -> bool {
        self.contains(&key)
    }
}

impl KeyboardState for [KeyCode] {
    fn is_pressed(&self, key: KeyCode) -> bool {
        self.contains(&key)
    }
}

bitflags! {
    /// Camera translations requested by the held movement keys
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CameraMovement: u8 {
        /// A: along -u
        const LEFT = 1 << 0;
        /// D: along +u
        const RIGHT = 1 << 1;
        /// W: along -w
        const FORWARD = 1 << 2;
        /// S: along +w
        const BACKWARD = 1 << 3;
    }
}

impl CameraMovement {
    /// Map WASD to movement flags
    pub fn from_keyboard<K: KeyboardState + ?Sized>(keys: &K) -> Self {
        let mut movement = CameraMovement::empty();
        movement.set(CameraMovement::LEFT, keys.is_pressed(KeyCode::KeyA));
        movement.set(CameraMovement::RIGHT, keys.is_pressed(KeyCode::KeyD));
        movement.set(CameraMovement::FORWARD, keys.is_pressed(KeyCode::KeyW));
        movement.set(CameraMovement::BACKWARD, keys.is_pressed(KeyCode::KeyS));
        movement
    }
}

#[cfg(test)]
#[path = "keyboard_tests.rs"]
mod tests;
