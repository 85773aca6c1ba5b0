//! Key assignments for the held signals and edge events.

use winit::keyboard::KeyCode;

/// Physical keys behind each signal. Launcher and camera controls share keys; the
/// active [`crate::InputMode`] decides which one consumes them.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub yaw_left: KeyCode,
    pub yaw_right: KeyCode,
    pub pitch_up: KeyCode,
    pub pitch_down: KeyCode,
    pub power_up: KeyCode,
    pub power_down: KeyCode,
    pub move_forward: KeyCode,
    pub move_back: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub rise: KeyCode,
    pub sink: KeyCode,
    pub roll_left: KeyCode,
    pub roll_right: KeyCode,
    /// Held to steer the free camera instead of the launcher.
    pub camera_mode: KeyCode,
    pub fire: KeyCode,
    pub next_view: KeyCode,
    /// Slot `i` selects view `i + 1`.
    pub select_view: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            yaw_left: KeyCode::ArrowLeft,
            yaw_right: KeyCode::ArrowRight,
            pitch_up: KeyCode::ArrowUp,
            pitch_down: KeyCode::ArrowDown,
            power_up: KeyCode::KeyW,
            power_down: KeyCode::KeyS,
            move_forward: KeyCode::KeyW,
            move_back: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            rise: KeyCode::KeyR,
            sink: KeyCode::KeyF,
            roll_left: KeyCode::KeyQ,
            roll_right: KeyCode::KeyE,
            camera_mode: KeyCode::ShiftLeft,
            fire: KeyCode::Space,
            next_view: KeyCode::KeyC,
            select_view: vec![
                KeyCode::Digit1,
                KeyCode::Digit2,
                KeyCode::Digit3,
                KeyCode::Digit4,
                KeyCode::Digit5,
                KeyCode::Digit6,
                KeyCode::Digit7,
                KeyCode::Digit8,
                KeyCode::Digit9,
            ],
        }
    }
}
