//! Camera rig: fixed views, a projectile chase view, and a free-fly camera.

use glam::{Mat4, Quat, Vec3};
use input::HeldSignals;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Free camera turn rate, degrees per second.
    pub rotate_speed_deg: f32,
    /// Free camera movement, units per second.
    pub move_speed: f32,
    /// Eye offset behind the launch point, rotated with the aim yaw.
    pub launcher_offset: Vec3,
    pub overview_eye: Vec3,
    pub overview_target: Vec3,
    /// Eye offset from the followed projectile.
    pub follow_offset: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            rotate_speed_deg: 60.0,
            move_speed: 1.75,
            launcher_offset: Vec3::new(0.0, 2.5, -7.0),
            overview_eye: Vec3::new(-35.0, 30.0, 20.0),
            overview_target: Vec3::new(0.0, 0.0, 25.0),
            follow_offset: Vec3::new(-4.0, 3.0, -6.0),
        }
    }
}

/// Selectable views, in `NextView` cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraView {
    Launcher,
    Overview,
    Follow,
    Free,
}

const VIEW_ORDER: [CameraView; 4] = [
    CameraView::Launcher,
    CameraView::Overview,
    CameraView::Follow,
    CameraView::Free,
];

/// Free-fly camera steered from held keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    /// Pitch (x), yaw (y), roll (z), radians.
    pub angles: Vec3,
}

impl FlyCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            angles: Vec3::ZERO,
        }
    }

    /// Yaw about Y, then pitch about X, then roll about Z.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.angles.y)
            * Quat::from_rotation_x(self.angles.x)
            * Quat::from_rotation_z(self.angles.z)
    }

    /// Turn with the aim axes and move in the yaw plane.
    pub fn update(&mut self, held: &HeldSignals, dt: f32, settings: &CameraSettings) {
        let turn = settings.rotate_speed_deg.to_radians() * dt;
        self.angles.y += held.yaw_axis() * turn;
        self.angles.x += held.pitch_axis() * turn;
        self.angles.z += held.roll_axis() * turn;

        let heading = Quat::from_rotation_y(self.angles.y);
        let step = settings.move_speed * dt;
        self.position += heading * Vec3::X * held.strafe_axis() * step;
        // Forward is -Z in camera space.
        self.position -= heading * Vec3::Z * held.forward_axis() * step;
        self.position += Vec3::Y * held.vertical_axis() * step;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation().inverse()) * Mat4::from_translation(-self.position)
    }
}

/// Where the camera looks from, given the current game state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFocus {
    pub launch_origin: Vec3,
    pub aim_yaw_deg: f32,
    /// Active projectile position when it is in the air.
    pub projectile: Option<Vec3>,
}

pub struct CameraRig {
    view: CameraView,
    free: FlyCamera,
    settings: CameraSettings,
    eye: Vec3,
    target: Vec3,
}

impl CameraRig {
    pub fn new(settings: CameraSettings, launch_origin: Vec3) -> Self {
        let eye = launch_origin + settings.launcher_offset;
        Self {
            view: CameraView::Launcher,
            free: FlyCamera::new(eye),
            settings,
            eye,
            target: launch_origin,
        }
    }

    pub fn view(&self) -> CameraView {
        self.view
    }

    pub fn set_view(&mut self, view: CameraView) {
        if self.view != view {
            log::debug!("Camera view: {:?}", view);
            self.view = view;
        }
    }

    pub fn next_view(&mut self) {
        let index = VIEW_ORDER.iter().position(|v| *v == self.view).unwrap_or(0);
        self.set_view(VIEW_ORDER[(index + 1) % VIEW_ORDER.len()]);
    }

    /// Select view `slot` (1-based). Returns false for slots with no view.
    pub fn select_view(&mut self, slot: usize) -> bool {
        match slot.checked_sub(1).and_then(|i| VIEW_ORDER.get(i)) {
            Some(view) => {
                self.set_view(*view);
                true
            }
            None => {
                log::debug!("No camera view in slot {}", slot);
                false
            }
        }
    }

    /// Steer the free camera. Switches to the free view.
    pub fn fly(&mut self, held: &HeldSignals, dt: f32) {
        self.set_view(CameraView::Free);
        self.free.update(held, dt, &self.settings);
    }

    /// Recompute eye and target for the fixed and chase views.
    pub fn update(&mut self, focus: &CameraFocus) {
        let yaw = Quat::from_rotation_y(focus.aim_yaw_deg.to_radians());
        match self.view {
            CameraView::Launcher => {
                self.eye = focus.launch_origin + yaw * self.settings.launcher_offset;
                self.target = focus.launch_origin + yaw * Vec3::Z * 10.0;
            }
            CameraView::Overview => {
                self.eye = self.settings.overview_eye;
                self.target = self.settings.overview_target;
            }
            CameraView::Follow => {
                let subject = focus.projectile.unwrap_or(focus.launch_origin);
                self.eye = subject + yaw * self.settings.follow_offset;
                self.target = subject;
            }
            CameraView::Free => {}
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        match self.view {
            CameraView::Free => self.free.view_matrix(),
            _ => Mat4::look_at_rh(self.eye, self.target, Vec3::Y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_view_cycles_through_all_views() {
        let mut rig = CameraRig::new(CameraSettings::default(), Vec3::ZERO);
        let mut seen = vec![rig.view()];
        for _ in 0..4 {
            rig.next_view();
            seen.push(rig.view());
        }
        assert_eq!(
            seen,
            vec![
                CameraView::Launcher,
                CameraView::Overview,
                CameraView::Follow,
                CameraView::Free,
                CameraView::Launcher
            ]
        );
    }

    #[test]
    fn select_view_is_one_based_and_ignores_unknown_slots() {
        let mut rig = CameraRig::new(CameraSettings::default(), Vec3::ZERO);
        assert!(rig.select_view(2));
        assert_eq!(rig.view(), CameraView::Overview);
        assert!(!rig.select_view(0));
        assert!(!rig.select_view(9));
        assert_eq!(rig.view(), CameraView::Overview);
    }

    #[test]
    fn free_camera_moves_forward_along_negative_z() {
        let settings = CameraSettings::default();
        let mut cam = FlyCamera::new(Vec3::ZERO);
        let held = HeldSignals {
            move_forward: true,
            ..Default::default()
        };
        cam.update(&held, 2.0, &settings);
        assert!((cam.position - Vec3::new(0.0, 0.0, -3.5)).length() < 1e-5);
    }

    #[test]
    fn free_camera_turns_at_configured_rate() {
        let settings = CameraSettings::default();
        let mut cam = FlyCamera::new(Vec3::ZERO);
        let held = HeldSignals {
            yaw_left: true,
            ..Default::default()
        };
        cam.update(&held, 1.5, &settings);
        assert!((cam.angles.y - 90.0_f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn free_view_matrix_maps_camera_position_to_origin() {
        let mut cam = FlyCamera::new(Vec3::new(3.0, 1.0, -2.0));
        cam.angles = Vec3::new(0.3, 1.1, -0.2);
        let eye_space = cam.view_matrix().transform_point3(cam.position);
        assert!(eye_space.length() < 1e-5);
    }

    #[test]
    fn follow_view_tracks_projectile() {
        let mut rig = CameraRig::new(CameraSettings::default(), Vec3::ZERO);
        rig.set_view(CameraView::Follow);
        let focus = CameraFocus {
            launch_origin: Vec3::ZERO,
            aim_yaw_deg: 0.0,
            projectile: Some(Vec3::new(0.0, 5.0, 12.0)),
        };
        rig.update(&focus);
        let eye_space = rig.view_matrix().transform_point3(Vec3::new(0.0, 5.0, 12.0));
        // The subject sits straight ahead (negative Z in view space).
        assert!(eye_space.x.abs() < 1e-4 && eye_space.y.abs() < 1e-4);
        assert!(eye_space.z < 0.0);
    }
}
