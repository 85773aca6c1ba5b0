//! Bounding volumes, overlap tests and ballistic kinematics for Hungry Bird.

pub mod ballistics;
pub mod bounds;
pub mod collision;

pub use ballistics::*;
pub use bounds::*;
pub use collision::*;
