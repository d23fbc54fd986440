//! Per-frame keyboard and mouse state built from winit window events.

use glam::Vec2;
use rustc_hash::FxHashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use crate::input::KeyboardState;

/// Tracks held keys and mouse movement for the render loop
///
/// Feed it every `WindowEvent`, read it during the frame, then call
/// `begin_frame` before the next batch of events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_down: FxHashSet<KeyCode>,
    cursor_position: Option<Vec2>,
    mouse_offset: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-frame accumulators
    pub fn begin_frame(&mut self) {
        self.mouse_offset = Vec2::ZERO;
    }

    /// Update state from a window event; unrelated events are ignored
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.handle_key(key, event.state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::Focused(false) => self.keys_down.clear(),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_down.insert(key);
            }
            ElementState::Released => {
                self.keys_down.remove(&key);
            }
        }
    }

    /// Record a new cursor position
    ///
    /// The first position only seeds the tracker so the initial jump from
    /// nowhere does not spin the camera.
    pub fn handle_cursor_moved(&mut self, position: Vec2) {
        if let Some(previous) = self.cursor_position {
            self.mouse_offset += position - previous;
        }
        self.cursor_position = Some(position);
    }

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Last known cursor position in window coordinates
    pub fn cursor_position(&self) -> Option<Vec2> {
        self.cursor_position
    }

    /// Cursor movement since `begin_frame`
    pub fn mouse_offset(&self) -> Vec2 {
        self.mouse_offset
    }
}

impl KeyboardState for InputState {
    fn is_pressed(&self, key: KeyCode) -> bool {
        self.key_down(key)
    }
}

#[cfg(test)]
#[path = "input_state_tests.rs"]
mod tests;
