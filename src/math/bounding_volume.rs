//! Axis-aligned bounding volume

use serde::{Deserialize, Serialize};

use crate::core::types::DVec3;

/// Axis-aligned box defined by a center and per-axis half-extents.
///
/// Used both as the spatial extent of an octree node and as a query region.
/// Half-extents are never negative; constructors take their absolute value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingVolume {
    pub center: DVec3,
    pub half_extent: DVec3,
}

impl BoundingVolume {
    /// Create a volume from center and half-extents
    pub fn new(center: DVec3, half_extent: DVec3) -> Self {
        Self {
            center,
            half_extent: half_extent.abs(),
        }
    }

    /// Create a cube with the same half-extent on every axis
    pub fn cube(center: DVec3, half_extent: f64) -> Self {
        Self::new(center, DVec3::splat(half_extent))
    }

    /// Create a volume from center and full size (width, height, depth)
    pub fn from_size(center: DVec3, size: DVec3) -> Self {
        Self::new(center, size * 0.5)
    }

    /// Minimum corner
    pub fn min(&self) -> DVec3 {
        self.center - self.half_extent
    }

    /// Maximum corner
    pub fn max(&self) -> DVec3 {
        self.center + self.half_extent
    }

    /// Get size (max - min)
    pub fn size(&self) -> DVec3 {
        self.half_extent * 2.0
    }

    /// True when center and extents are all finite numbers
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.half_extent.is_finite()
    }

    /// Check if point is inside the volume (inclusive on both faces)
    ///
    /// NaN coordinates never compare inside.
    pub fn contains(&self, p: DVec3) -> bool {
        let min = self.min();
        let max = self.max();
        p.x >= min.x && p.x <= max.x &&
        p.y >= min.y && p.y <= max.y &&
        p.z >= min.z && p.z <= max.z
    }

    /// Check if two volumes overlap. Touching faces count as overlapping.
    pub fn intersects(&self, other: &BoundingVolume) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        !(b_min.x > a_max.x || b_max.x < a_min.x ||
          b_min.y > a_max.y || b_max.y < a_min.y ||
          b_min.z > a_max.z || b_max.z < a_min.z)
    }

    /// Get child octant volume for octree subdivision
    /// index: 0-7 representing xyz octant (bit 0=x, bit 1=y, bit 2=z)
    pub fn child_octant(&self, index: u8) -> BoundingVolume {
        let half = self.half_extent * 0.5;

        let offset = DVec3::new(
            if index & 1 != 0 { half.x } else { -half.x },
            if index & 2 != 0 { half.y } else { -half.y },
            if index & 4 != 0 { half.z } else { -half.z },
        );

        BoundingVolume::new(self.center + offset, half)
    }
}
