//! Spatial indexing of catalog points

pub mod point;
pub mod node;
pub mod octree;

pub use point::Point3D;
pub use node::{NodeIndex, OctreeNode};
pub use octree::{OctreeConfig, OctreeStats, PointOctree};
