//! World setup failures. All of them abort initialisation.

use physics::BoundsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("mesh `{0}` has no vertex data")]
    MissingMesh(String),
    #[error("invalid vertex data for mesh `{mesh}`")]
    Bounds {
        mesh: String,
        #[source]
        source: BoundsError,
    },
    #[error("projectile pool must hold at least one projectile")]
    EmptyPool,
    #[error("power range [{min}, {max}] must be positive and non-empty")]
    InvalidPowerRange { min: f32, max: f32 },
    #[error("pitch range [{min}, {max}] is empty")]
    InvalidPitchRange { min: f32, max: f32 },
}
