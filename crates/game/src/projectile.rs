//! The bird: a ballistic flight state machine.

use engine_core::Transform;
use glam::Vec3;
use physics::{BoundingVolume, Trajectory};
use serde::{Deserialize, Serialize};

/// Tuning shared by every projectile in the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileSettings {
    /// Mesh whose vertices give the projectile's hitbox.
    pub mesh: String,
    /// Uniform render scale.
    pub model_scale: f32,
}

impl Default for ProjectileSettings {
    fn default() -> Self {
        Self {
            mesh: "bird".to_string(),
            model_scale: 1.0,
        }
    }
}

/// `Idle → Ready → Flying → Landed → Ready`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectilePhase {
    #[default]
    Idle,
    Ready,
    Flying,
    Landed,
}

/// Flight state of one projectile. Position is recomputed from launch conditions
/// every step, so frame rate does not change the arc.
#[derive(Debug, Clone)]
pub struct Projectile {
    origin: Vec3,
    position: Vec3,
    heading_deg: f32,
    launch_deg: f32,
    launch_speed: f32,
    phase: ProjectilePhase,
    flight_start: f64,
    landed_at: Option<f64>,
    /// Nose tilt about local X, radians.
    tilt: f32,
    hitbox: BoundingVolume,
    model_scale: f32,
}

impl Projectile {
    pub fn new(hitbox: BoundingVolume, model_scale: f32) -> Self {
        Self {
            origin: Vec3::ZERO,
            position: Vec3::ZERO,
            heading_deg: 0.0,
            launch_deg: 0.0,
            launch_speed: 0.0,
            phase: ProjectilePhase::Idle,
            flight_start: 0.0,
            landed_at: None,
            tilt: 0.0,
            hitbox,
            model_scale,
        }
    }

    /// Load onto the launcher at `origin`. Valid from any phase.
    pub fn arm(&mut self, origin: Vec3) {
        self.origin = origin;
        self.position = origin;
        self.tilt = 0.0;
        self.landed_at = None;
        self.phase = ProjectilePhase::Ready;
    }

    /// Start a flight at time `now`. Ignored unless ready.
    pub fn launch(&mut self, speed: f32, pitch_deg: f32, yaw_deg: f32, now: f64) -> bool {
        if self.phase != ProjectilePhase::Ready {
            log::debug!("Launch ignored: projectile is {:?}", self.phase);
            return false;
        }
        self.launch_speed = speed;
        self.launch_deg = pitch_deg;
        self.heading_deg = yaw_deg;
        self.flight_start = now;
        self.phase = ProjectilePhase::Flying;
        self.tilt = self.trajectory().tilt_at(0.0);
        true
    }

    /// Advance the flight to time `now`. Returns true on the step that lands.
    pub fn step(&mut self, now: f64) -> bool {
        if self.phase != ProjectilePhase::Flying {
            return false;
        }
        let t = (now - self.flight_start).max(0.0) as f32;
        let trajectory = self.trajectory();
        self.position = trajectory.position_at(t);
        self.tilt = trajectory.tilt_at(t);

        if self.position.y <= 0.0 {
            self.position.y = 0.0;
            self.phase = ProjectilePhase::Landed;
            self.landed_at = Some(now);
            log::debug!(
                "Projectile landed at ({:.2}, {:.2}) after {:.2}s",
                self.position.x,
                self.position.z,
                t
            );
            return true;
        }
        false
    }

    /// Stop the flight because something was hit. The owner hides the member.
    pub fn hit_externally(&mut self) {
        self.phase = ProjectilePhase::Landed;
        self.position.y = 0.0;
    }

    pub fn trajectory(&self) -> Trajectory {
        Trajectory::new(
            self.origin,
            self.launch_speed,
            self.launch_deg,
            self.heading_deg,
        )
    }

    /// Hitbox at the current position.
    pub fn world_box(&self) -> BoundingVolume {
        self.hitbox.translated(self.position)
    }

    /// translate × rotate(heading, tilt) × scale.
    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(
            self.position,
            Transform::heading_rotation(self.heading_deg.to_radians(), self.tilt),
        )
        .with_scale(Vec3::splat(self.model_scale))
    }

    pub fn phase(&self) -> ProjectilePhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == ProjectilePhase::Ready
    }

    pub fn is_flying(&self) -> bool {
        self.phase == ProjectilePhase::Flying
    }

    pub fn has_landed(&self) -> bool {
        self.phase == ProjectilePhase::Landed
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    pub fn flight_start(&self) -> f64 {
        self.flight_start
    }

    /// When the projectile touched the ground on its own, if it has.
    pub fn landed_at(&self) -> Option<f64> {
        self.landed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physics::time_to_ground;

    fn bird() -> Projectile {
        Projectile::new(
            BoundingVolume::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.25)),
            1.0,
        )
    }

    #[test]
    fn cannot_launch_before_arming() {
        let mut p = bird();
        assert_eq!(p.phase(), ProjectilePhase::Idle);
        assert!(!p.launch(10.0, 30.0, 0.0, 0.0));
        assert_eq!(p.phase(), ProjectilePhase::Idle);
    }

    #[test]
    fn arm_places_projectile_at_origin() {
        let mut p = bird();
        let origin = Vec3::new(1.0, 9.5, -2.0);
        p.arm(origin);
        assert!(p.is_ready());
        assert!(!p.is_flying());
        assert_eq!(p.position(), origin);
        assert_eq!(p.origin(), origin);
    }

    #[test]
    fn launch_is_single_shot() {
        let mut p = bird();
        p.arm(Vec3::ZERO);
        assert!(p.launch(10.0, 45.0, 0.0, 2.0));
        assert!(p.is_flying());
        assert!(!p.is_ready());
        assert_eq!(p.flight_start(), 2.0);
        assert!(!p.launch(10.0, 45.0, 0.0, 2.5));
    }

    #[test]
    fn flight_follows_closed_form_and_lands_at_root() {
        let mut p = bird();
        p.arm(Vec3::new(0.0, 9.5, 0.0));
        p.launch(10.0, 30.0, 0.0, 1.0);

        assert!(!p.step(1.5));
        let expected = Trajectory::new(Vec3::new(0.0, 9.5, 0.0), 10.0, 30.0, 0.0).position_at(0.5);
        assert!((p.position() - expected).length() < 1e-4);
        assert!(p.tilt() < 0.0, "still climbing at t=0.5");

        let landing = time_to_ground(9.5, 10.0, 30.0) as f64;
        assert!(!p.step(1.0 + landing - 0.01));
        assert!(p.step(1.0 + landing + 0.01));
        assert!(p.has_landed());
        assert_eq!(p.position().y, 0.0);
        assert_eq!(p.landed_at(), Some(1.0 + landing + 0.01));

        // Landed projectiles stay put.
        let rest = p.position();
        assert!(!p.step(10.0));
        assert_eq!(p.position(), rest);
    }

    #[test]
    fn flat_launch_from_ground_lands_on_first_step() {
        let mut p = bird();
        p.arm(Vec3::ZERO);
        p.launch(10.0, 0.0, 0.0, 0.0);
        assert!(p.step(0.0));
        assert!(p.has_landed());
    }

    #[test]
    fn external_hit_pins_to_ground() {
        let mut p = bird();
        p.arm(Vec3::new(0.0, 5.0, 0.0));
        p.launch(12.0, 20.0, 0.0, 0.0);
        p.step(0.3);
        let x = p.position();
        p.hit_externally();
        assert!(!p.is_flying());
        assert_eq!(p.position(), Vec3::new(x.x, 0.0, x.z));
        assert_eq!(p.landed_at(), None);
    }

    #[test]
    fn world_box_follows_position() {
        let mut p = bird();
        p.arm(Vec3::new(3.0, 4.0, 5.0));
        let b = p.world_box();
        assert_eq!(b.center(), Vec3::new(3.0, 4.0, 5.0));
    }
}
