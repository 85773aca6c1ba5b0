//! Slingshot: aim, power, trajectory preview, and the turn order over the projectile pool.

use engine_core::{Clock, Transform};
use glam::Vec3;
use hecs::{Entity, EntityBuilder};
use input::HeldSignals;
use physics::Trajectory;
use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::projectile::Projectile;
use crate::scene::{MemberKind, SceneRegistry};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    /// Launch point; every projectile is armed here.
    pub origin: Vec3,
    /// Pitch limits in degrees.
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_power: f32,
    pub max_power: f32,
    pub initial_power: f32,
    pub initial_yaw: f32,
    pub initial_pitch: f32,
    /// Power change per second while held.
    pub power_rate: f32,
    /// Aim speed in degrees per second is `rotation_gain / power`.
    pub rotation_gain: f32,
    /// Number of trajectory preview markers.
    pub preview_samples: usize,
    pub marker_scale: f32,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            origin: Vec3::new(0.0, 9.5, 0.0),
            min_pitch: -90.0,
            max_pitch: 25.57,
            min_power: 5.0,
            max_power: 25.0,
            initial_power: 12.0,
            initial_yaw: 0.0,
            initial_pitch: 10.0,
            power_rate: 6.0,
            rotation_gain: 600.0,
            preview_samples: 24,
            marker_scale: 0.15,
        }
    }
}

/// Launch direction in degrees. Yaw is unbounded; pitch is clamped by the launcher.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aim {
    pub yaw: f32,
    pub pitch: f32,
}

/// Tag for a trajectory preview member. Markers never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewMarker {
    pub index: usize,
}

pub struct Launcher {
    settings: LauncherSettings,
    aim: Aim,
    power: f32,
    pool: Vec<Entity>,
    active: usize,
    preview: Vec<Entity>,
}

impl Launcher {
    /// Register the projectile pool and the preview markers, and arm the first projectile.
    pub fn install(
        settings: LauncherSettings,
        pool_size: usize,
        template: &Projectile,
        registry: &mut SceneRegistry,
    ) -> Result<Self, SetupError> {
        if pool_size == 0 {
            return Err(SetupError::EmptyPool);
        }
        if settings.min_power <= 0.0 || settings.min_power > settings.max_power {
            return Err(SetupError::InvalidPowerRange {
                min: settings.min_power,
                max: settings.max_power,
            });
        }
        if settings.min_pitch > settings.max_pitch {
            return Err(SetupError::InvalidPitchRange {
                min: settings.min_pitch,
                max: settings.max_pitch,
            });
        }

        let mut components = EntityBuilder::new();
        let pool = (0..pool_size)
            .map(|_| {
                components.add(template.clone());
                registry.register(
                    MemberKind::Projectile,
                    Transform::from_position(settings.origin),
                    false,
                    &mut components,
                )
            })
            .collect::<Vec<_>>();

        let marker_transform =
            Transform::from_position(settings.origin).with_scale(Vec3::splat(settings.marker_scale));
        let preview = (0..settings.preview_samples)
            .map(|index| {
                components.add(PreviewMarker { index });
                registry.register(MemberKind::PreviewMarker, marker_transform, true, &mut components)
            })
            .collect::<Vec<_>>();

        let aim = Aim {
            yaw: settings.initial_yaw,
            pitch: settings.initial_pitch.clamp(settings.min_pitch, settings.max_pitch),
        };
        let power = settings
            .initial_power
            .clamp(settings.min_power, settings.max_power);

        let launcher = Self {
            settings,
            aim,
            power,
            pool,
            active: 0,
            preview,
        };
        registry.arm_projectile(launcher.pool[0], launcher.settings.origin);
        launcher.recompute_preview(registry);
        log::info!(
            "Launcher ready: {} projectiles, {} preview markers",
            pool_size,
            launcher.preview.len()
        );
        Ok(launcher)
    }

    /// Degrees per second; faster at low power.
    pub fn rotation_speed(&self) -> f32 {
        self.settings.rotation_gain / self.power.max(f32::EPSILON)
    }

    /// Apply held aim and power input. Returns true if aim or power changed.
    pub fn apply_input(&mut self, held: &HeldSignals, delta: f32) -> bool {
        let before = (self.aim, self.power);
        let step = self.rotation_speed() * delta;

        self.aim.yaw += held.yaw_axis() * step;
        self.aim.pitch = (self.aim.pitch + held.pitch_axis() * step)
            .clamp(self.settings.min_pitch, self.settings.max_pitch);
        self.power = (self.power + held.power_axis() * self.settings.power_rate * delta)
            .clamp(self.settings.min_power, self.settings.max_power);

        (self.aim, self.power) != before
    }

    /// Apply input and refresh the preview if the trajectory moved.
    pub fn update(&mut self, held: &HeldSignals, delta: f32, registry: &mut SceneRegistry) -> bool {
        let changed = self.apply_input(held, delta);
        if changed {
            self.recompute_preview(registry);
        }
        changed
    }

    /// Set aim and power directly (clamped) and refresh the preview.
    pub fn aim_at(&mut self, yaw: f32, pitch: f32, power: f32, registry: &mut SceneRegistry) {
        self.aim = Aim {
            yaw,
            pitch: pitch.clamp(self.settings.min_pitch, self.settings.max_pitch),
        };
        self.power = power.clamp(self.settings.min_power, self.settings.max_power);
        self.recompute_preview(registry);
    }

    /// Flight for the current aim and power from the launch point.
    pub fn trajectory(&self) -> Trajectory {
        Trajectory::new(self.settings.origin, self.power, self.aim.pitch, self.aim.yaw)
    }

    /// Marker positions: `N` samples at equal steps of the time of flight, from the origin.
    pub fn preview_positions(&self) -> Vec<Vec3> {
        let trajectory = self.trajectory();
        let count = self.preview.len();
        if count == 0 {
            return Vec::new();
        }
        let step = trajectory.time_of_flight() / count as f32;
        (0..count)
            .map(|i| trajectory.position_at(step * i as f32))
            .collect()
    }

    pub fn recompute_preview(&self, registry: &mut SceneRegistry) {
        for (marker, position) in self.preview.iter().zip(self.preview_positions()) {
            registry.place(*marker, position);
        }
    }

    /// Launch the active projectile if it is ready.
    pub fn shoot(&mut self, registry: &mut SceneRegistry, clock: &Clock) -> bool {
        let projectile = self.active_projectile();
        let launched = registry.launch_projectile(
            projectile,
            self.power,
            self.aim.pitch,
            self.aim.yaw,
            clock,
        );
        if launched {
            log::info!(
                "Shot {}: power {:.1}, pitch {:.1}°, yaw {:.1}°",
                self.active,
                self.power,
                self.aim.pitch,
                self.aim.yaw
            );
        } else {
            log::debug!("Fire ignored: projectile {} is not ready", self.active);
        }
        launched
    }

    /// Move to the next projectile in the pool, whatever the current one is doing,
    /// and arm it. Returns the new active index.
    pub fn advance_turn(&mut self, registry: &mut SceneRegistry) -> usize {
        self.active = (self.active + 1) % self.pool.len();
        registry.arm_projectile(self.active_projectile(), self.settings.origin);
        log::info!("Turn passes to projectile {}", self.active);
        self.active
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_projectile(&self) -> Entity {
        self.pool[self.active]
    }

    pub fn pool(&self) -> &[Entity] {
        &self.pool
    }

    pub fn preview_markers(&self) -> &[Entity] {
        &self.preview
    }

    pub fn aim(&self) -> Aim {
        self.aim
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn origin(&self) -> Vec3 {
        self.settings.origin
    }
}
