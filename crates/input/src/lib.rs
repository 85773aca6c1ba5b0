//! Keyboard and mouse sampling, reduced to the per-frame signals the game consumes.

use std::collections::HashSet;

mod bindings;
mod frame;

pub use bindings::KeyBindings;
pub use frame::{FrameInput, HeldSignals, InputEvent, InputMode};

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call once the frame's input has been consumed.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    /// Drop all held state, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        self.keys_held.clear();
        self.mouse_held.clear();
        self.end_frame();
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Check if a mouse button was pressed this frame.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Sample this frame's held signals and edge events through `bindings`.
    pub fn frame_input(&self, bindings: &KeyBindings) -> FrameInput {
        let held = HeldSignals {
            yaw_left: self.is_key_held(bindings.yaw_left),
            yaw_right: self.is_key_held(bindings.yaw_right),
            pitch_up: self.is_key_held(bindings.pitch_up),
            pitch_down: self.is_key_held(bindings.pitch_down),
            power_up: self.is_key_held(bindings.power_up),
            power_down: self.is_key_held(bindings.power_down),
            move_forward: self.is_key_held(bindings.move_forward),
            move_back: self.is_key_held(bindings.move_back),
            move_left: self.is_key_held(bindings.move_left),
            move_right: self.is_key_held(bindings.move_right),
            rise: self.is_key_held(bindings.rise),
            sink: self.is_key_held(bindings.sink),
            roll_left: self.is_key_held(bindings.roll_left),
            roll_right: self.is_key_held(bindings.roll_right),
            camera_mode: self.is_key_held(bindings.camera_mode),
        };

        let mut events = Vec::new();
        if self.is_key_pressed(bindings.fire) || self.is_mouse_pressed(MouseButton::Left) {
            events.push(InputEvent::Fire);
        }
        if self.is_key_pressed(bindings.next_view) {
            events.push(InputEvent::NextView);
        }
        for (slot, key) in bindings.select_view.iter().enumerate() {
            if self.is_key_pressed(*key) {
                events.push(InputEvent::SelectView(slot + 1));
            }
        }
        if !events.is_empty() {
            log::trace!("Input events this frame: {:?}", events);
        }

        FrameInput::new(held, events)
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
