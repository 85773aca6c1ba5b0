//! Axis-aligned bounding boxes derived from mesh vertices.

use glam::Vec3;
use thiserror::Error;

/// Failure to derive a bounding volume from asset data.
#[derive(Debug, Error, PartialEq)]
pub enum BoundsError {
    #[error("vertex list is empty")]
    EmptyVertexList,
    #[error("vertex {index} has a non-finite coordinate: {vertex}")]
    NonFiniteVertex { index: usize, vertex: Vec3 },
    #[error("compound volume has no parts")]
    EmptyCompound,
}

/// Axis-aligned box: one closed interval per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingVolume {
    /// Box from explicit corners. Components are sorted so `min <= max` on every axis.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box centred on `center` with the given half extents.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Smallest box containing every vertex, in a single pass.
    pub fn from_vertices(points: &[Vec3]) -> Result<Self, BoundsError> {
        let mut iter = points.iter().copied().enumerate();
        let (_, first) = iter.next().ok_or(BoundsError::EmptyVertexList)?;
        if !first.is_finite() {
            return Err(BoundsError::NonFiniteVertex {
                index: 0,
                vertex: first,
            });
        }

        let mut min = first;
        let mut max = first;
        for (index, vertex) in iter {
            if !vertex.is_finite() {
                return Err(BoundsError::NonFiniteVertex { index, vertex });
            }
            min = min.min(vertex);
            max = max.max(vertex);
        }
        Ok(Self { min, max })
    }

    /// The same box moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Strict interval overlap on all three axes. Touching faces do not count.
    pub fn overlaps(&self, other: &BoundingVolume) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
            && self.min.z < other.max.z
            && other.min.z < self.max.z
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Several boxes sharing one owner. The owner is hit when any part is.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundBoundingVolume {
    parts: Vec<BoundingVolume>,
}

impl CompoundBoundingVolume {
    pub fn new(parts: Vec<BoundingVolume>) -> Result<Self, BoundsError> {
        if parts.is_empty() {
            return Err(BoundsError::EmptyCompound);
        }
        Ok(Self { parts })
    }

    /// One box per vertex list, in order.
    pub fn from_vertex_sets<S: AsRef<[Vec3]>>(sets: &[S]) -> Result<Self, BoundsError> {
        let parts = sets
            .iter()
            .map(|set| BoundingVolume::from_vertices(set.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parts)
    }

    pub fn parts(&self) -> &[BoundingVolume] {
        &self.parts
    }

    /// True as soon as one part overlaps `other`.
    pub fn overlaps(&self, other: &BoundingVolume) -> bool {
        self.parts.iter().any(|part| part.overlaps(other))
    }

    /// Box enclosing every part.
    pub fn envelope(&self) -> BoundingVolume {
        self.parts[1..]
            .iter()
            .fold(self.parts[0], |acc, part| BoundingVolume {
                min: acc.min.min(part.min),
                max: acc.max.max(part.max),
            })
    }
}
