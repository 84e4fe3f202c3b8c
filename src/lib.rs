//! Starfield - octree point index with camera-driven visibility for star catalogs
//!
//! Points flow from a [`visibility::PointSource`] (usually a
//! [`catalog::StarCatalog`]) into a [`spatial::PointOctree`]. A
//! [`visibility::VisibilityManager`] answers "what lies within R of the
//! camera" and loads more of the source when the answer is too sparse.

pub mod core;
pub mod math;
pub mod spatial;
pub mod visibility;
pub mod catalog;
