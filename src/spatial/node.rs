//! Octree arena node

use crate::math::BoundingVolume;
use super::point::Point3D;

/// Handle to a node in the octree arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Index of the root node
    pub const ROOT: NodeIndex = NodeIndex(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the arena
    pub fn as_usize(self) -> usize {
        self.0
    }

    /// Handle of the `octant`-th sibling when `self` is a first child
    pub(crate) fn offset(self, octant: u8) -> NodeIndex {
        debug_assert!(octant < 8);
        NodeIndex(self.0 + octant as usize)
    }
}

/// A single node of the point octree.
///
/// Children, when present, occupy 8 consecutive arena slots starting at
/// `first_child`, ordered by octant (bit 0 = +x, bit 1 = +y, bit 2 = +z).
#[derive(Clone, Debug)]
pub struct OctreeNode<P> {
    /// Spatial extent of this node
    pub(crate) boundary: BoundingVolume,
    /// Depth below the root (root = 0)
    pub(crate) level: u32,
    /// Points stored directly in this node, in insertion order
    pub(crate) points: Vec<Point3D<P>>,
    /// First of 8 consecutive children, or None for a leaf
    pub(crate) first_child: Option<NodeIndex>,
}

impl<P> OctreeNode<P> {
    pub(crate) fn new(boundary: BoundingVolume, level: u32) -> Self {
        Self {
            boundary,
            level,
            points: Vec::new(),
            first_child: None,
        }
    }

    pub fn boundary(&self) -> &BoundingVolume {
        &self.boundary
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn points(&self) -> &[Point3D<P>] {
        &self.points
    }

    /// Check if node has no children
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }

    /// Handles of the 8 children in octant order, if subdivided
    pub fn children(&self) -> Option<[NodeIndex; 8]> {
        self.first_child
            .map(|first| std::array::from_fn(|octant| first.offset(octant as u8)))
    }
}
