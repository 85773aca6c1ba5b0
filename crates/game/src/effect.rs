//! Impact feedback: a spinning burst that grows, then disappears.

use engine_core::Transform;
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    /// Radians per second, applied to every axis.
    pub rotation_rate: f32,
    /// Scale units per second.
    pub growth_rate: f32,
    /// The effect ends once its scale passes this.
    pub max_scale: f32,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            rotation_rate: 4.0,
            growth_rate: 3.0,
            max_scale: 2.5,
        }
    }
}

/// Non-physical member; never collides.
#[derive(Debug, Clone)]
pub struct FeedbackEffect {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    growing: bool,
    settings: EffectSettings,
}

impl FeedbackEffect {
    pub fn new(settings: EffectSettings) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ZERO,
            growing: false,
            settings,
        }
    }

    /// Restart the animation at `position`. The owner shows the member.
    pub fn trigger(&mut self, position: Vec3) {
        self.position = position;
        self.rotation = Vec3::ZERO;
        self.scale = Vec3::ZERO;
        self.growing = true;
    }

    /// Advance by `delta` seconds. Returns true on the step the animation ends, at which
    /// point the owner hides the member.
    pub fn step(&mut self, delta: f32) -> bool {
        if !self.growing {
            return false;
        }
        self.rotation += Vec3::splat(self.settings.rotation_rate * delta);
        self.scale += Vec3::splat(self.settings.growth_rate * delta);
        if self.scale.x > self.settings.max_scale {
            self.growing = false;
            return true;
        }
        false
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(self.position, Transform::euler_rotation(self.rotation))
            .with_scale(self.scale)
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_resets_animation() {
        let mut effect = FeedbackEffect::new(EffectSettings::default());
        effect.trigger(Vec3::ONE);
        effect.step(0.1);
        effect.trigger(Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(effect.scale(), Vec3::ZERO);
        assert_eq!(effect.rotation(), Vec3::ZERO);
        assert_eq!(effect.position(), Vec3::new(2.0, 0.0, 0.0));
        assert!(effect.is_growing());
    }

    #[test]
    fn grows_and_spins_with_delta() {
        let settings = EffectSettings {
            rotation_rate: 2.0,
            growth_rate: 1.0,
            max_scale: 5.0,
        };
        let mut effect = FeedbackEffect::new(settings);
        effect.trigger(Vec3::ZERO);
        assert!(!effect.step(0.5));
        assert!((effect.scale().x - 0.5).abs() < 1e-6);
        assert!((effect.rotation().y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ends_once_scale_passes_maximum() {
        let settings = EffectSettings::default();
        let mut effect = FeedbackEffect::new(settings);
        effect.trigger(Vec3::ZERO);
        let lifetime = settings.max_scale / settings.growth_rate;

        let mut elapsed = 0.0;
        let mut ended = false;
        while elapsed < lifetime + 0.1 {
            ended |= effect.step(1.0 / 60.0);
            elapsed += 1.0 / 60.0;
        }
        assert!(ended);
        assert!(!effect.is_growing());

        // Further steps do nothing.
        let scale = effect.scale();
        assert!(!effect.step(1.0));
        assert_eq!(effect.scale(), scale);
    }

    #[test]
    fn idle_effect_does_not_animate() {
        let mut effect = FeedbackEffect::new(EffectSettings::default());
        assert!(!effect.step(1.0));
        assert_eq!(effect.scale(), Vec3::ZERO);
    }
}
