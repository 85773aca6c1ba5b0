//! Closed-form ballistic kinematics.
//!
//! Angles are degrees at the API boundary. Yaw 0 launches along +Z, yaw 90 along +X.

use glam::{Vec2, Vec3};

/// Gravitational acceleration (units per second squared).
pub const GRAVITY: f32 = 9.8;

/// Launch conditions for one flight. Everything else is a function of time since launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    pub origin: Vec3,
    pub speed: f32,
    pub pitch_deg: f32,
    pub yaw_deg: f32,
}

impl Trajectory {
    pub fn new(origin: Vec3, speed: f32, pitch_deg: f32, yaw_deg: f32) -> Self {
        Self {
            origin,
            speed,
            pitch_deg,
            yaw_deg,
        }
    }

    /// Horizontal distance covered after `t` seconds.
    pub fn horizontal_range(&self, t: f32) -> f32 {
        self.speed * self.pitch_deg.to_radians().cos() * t
    }

    /// Height above the origin after `t` seconds.
    pub fn height(&self, t: f32) -> f32 {
        self.speed * self.pitch_deg.to_radians().sin() * t - 0.5 * GRAVITY * t * t
    }

    /// World position after `t` seconds of flight.
    pub fn position_at(&self, t: f32) -> Vec3 {
        let r = self.horizontal_range(t);
        let yaw = self.yaw_deg.to_radians();
        Vec3::new(
            self.origin.x + r * yaw.sin(),
            self.origin.y + self.height(t),
            self.origin.z + r * yaw.cos(),
        )
    }

    /// Velocity in the launch plane: `x` horizontal, `y` vertical.
    pub fn planar_velocity(&self, t: f32) -> Vec2 {
        let pitch = self.pitch_deg.to_radians();
        Vec2::new(
            self.speed * pitch.cos(),
            self.speed * pitch.sin() - GRAVITY * t,
        )
    }

    /// Nose tilt in radians about the local X axis.
    ///
    /// The magnitude is the angle between the velocity and the horizontal. It is negated
    /// while still climbing, which rotates a +Z-facing model nose-up.
    pub fn tilt_at(&self, t: f32) -> f32 {
        let v = self.planar_velocity(t);
        let speed = v.length();
        if speed <= f32::EPSILON {
            return 0.0;
        }
        let angle = (v.x / speed).clamp(-1.0, 1.0).acos();
        if v.y > 0.0 {
            -angle
        } else {
            angle
        }
    }

    /// Time at which the flight returns to height zero.
    pub fn time_of_flight(&self) -> f32 {
        time_to_ground(self.origin.y, self.speed, self.pitch_deg)
    }
}

/// Positive root of `height + v0·sin(pitch)·t − ½·g·t² = 0`.
///
/// Returns zero when there is no positive root (already below ground and never rising
/// above it), and for the degenerate launch from ground level with no upward speed.
pub fn time_to_ground(height: f32, speed: f32, pitch_deg: f32) -> f32 {
    let vy = speed * pitch_deg.to_radians().sin();
    let discriminant = vy * vy + 2.0 * GRAVITY * height;
    if discriminant < 0.0 {
        return 0.0;
    }
    ((vy + discriminant.sqrt()) / GRAVITY).max(0.0)
}
