//! Hungry Bird gameplay simulation: launch birds from a slingshot and knock down pigs.
//!
//! Per frame, [`Game::frame`] advances the clock, applies input to the launcher or the
//! free camera, asks every scene member for its transform, resolves at most one hit for
//! the airborne bird, and passes the turn when a bird is spent.

pub mod camera;
pub mod collision;
pub mod config;
pub mod effect;
pub mod error;
pub mod launcher;
pub mod level;
pub mod projectile;
pub mod scene;
pub mod state;

pub use camera::{CameraRig, CameraSettings, CameraView, FlyCamera};
pub use collision::{scan, CollisionResolver, Contact, Impact};
pub use config::GameConfig;
pub use effect::{EffectSettings, FeedbackEffect};
pub use error::SetupError;
pub use launcher::{Aim, Launcher, LauncherSettings, PreviewMarker};
pub use level::{LevelLayout, MeshSource, PrimitiveMeshes, PropRole, PropSpec};
pub use projectile::{Projectile, ProjectilePhase, ProjectileSettings};
pub use scene::{MemberKind, RenderInstance, SceneRegistry, Visibility};
pub use state::{FrameReport, Game, Scoreboard};
