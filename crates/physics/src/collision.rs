//! Collision shapes and the component that attaches one to a scene member.

use crate::bounds::{BoundingVolume, BoundsError, CompoundBoundingVolume};
use glam::Vec3;

/// Local-space collision geometry for one owner.
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionShape {
    Single(BoundingVolume),
    Compound(CompoundBoundingVolume),
}

impl CollisionShape {
    /// Build from one vertex list per sub-box. A single list yields [`CollisionShape::Single`].
    pub fn from_vertex_sets<S: AsRef<[Vec3]>>(sets: &[S]) -> Result<Self, BoundsError> {
        match sets {
            [] => Err(BoundsError::EmptyCompound),
            [only] => Ok(Self::Single(BoundingVolume::from_vertices(only.as_ref())?)),
            many => Ok(Self::Compound(CompoundBoundingVolume::from_vertex_sets(many)?)),
        }
    }

    /// Test this shape, placed at `position`, against a world-space box.
    pub fn overlaps_at(&self, position: Vec3, other: &BoundingVolume) -> bool {
        match self {
            Self::Single(volume) => volume.translated(position).overlaps(other),
            Self::Compound(compound) => compound
                .parts()
                .iter()
                .any(|part| part.translated(position).overlaps(other)),
        }
    }

    /// Number of boxes making up the shape.
    pub fn part_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Compound(compound) => compound.parts().len(),
        }
    }
}

/// Component marking a scene member as collidable.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub shape: CollisionShape,
}

impl Collider {
    pub fn new(shape: CollisionShape) -> Self {
        Self { shape }
    }
}
