//! Per-frame input snapshot handed to the simulation.

/// Which system consumes the held axes this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Axes aim the launcher and change power.
    #[default]
    Launcher,
    /// Axes fly the free camera.
    Camera,
}

/// Edge-triggered events, delivered once per press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Fire,
    NextView,
    /// 1-based view slot.
    SelectView(usize),
}

/// Keys held during this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldSignals {
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub power_up: bool,
    pub power_down: bool,
    pub move_forward: bool,
    pub move_back: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub rise: bool,
    pub sink: bool,
    pub roll_left: bool,
    pub roll_right: bool,
    pub camera_mode: bool,
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

impl HeldSignals {
    /// +1 turning left (counter-clockwise seen from above), -1 turning right.
    pub fn yaw_axis(&self) -> f32 {
        axis(self.yaw_left, self.yaw_right)
    }

    pub fn pitch_axis(&self) -> f32 {
        axis(self.pitch_up, self.pitch_down)
    }

    pub fn power_axis(&self) -> f32 {
        axis(self.power_up, self.power_down)
    }

    pub fn forward_axis(&self) -> f32 {
        axis(self.move_forward, self.move_back)
    }

    pub fn strafe_axis(&self) -> f32 {
        axis(self.move_right, self.move_left)
    }

    pub fn vertical_axis(&self) -> f32 {
        axis(self.rise, self.sink)
    }

    pub fn roll_axis(&self) -> f32 {
        axis(self.roll_left, self.roll_right)
    }
}

/// Everything the simulation reads from input in one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub held: HeldSignals,
    pub events: Vec<InputEvent>,
    pub mode: InputMode,
}

impl FrameInput {
    /// Snapshot with the mode derived from the held toggle.
    pub fn new(held: HeldSignals, events: Vec<InputEvent>) -> Self {
        let mode = if held.camera_mode {
            InputMode::Camera
        } else {
            InputMode::Launcher
        };
        Self { held, events, mode }
    }

    /// A frame with nothing held and no events.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A frame whose only content is the given events.
    pub fn with_events(events: Vec<InputEvent>) -> Self {
        Self::new(HeldSignals::default(), events)
    }
}
