//! Core engine types and utilities for Hungry Bird.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and its GPU-ready matrix form
//! - Frame clock

pub mod time;
pub mod transform;

pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
