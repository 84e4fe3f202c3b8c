//! Geometric primitives

pub mod bounding_volume;

pub use bounding_volume::BoundingVolume;
