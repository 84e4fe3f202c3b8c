//! Indexed point with an opaque payload

use crate::core::types::DVec3;

/// A point in index space carrying caller-defined metadata.
///
/// The index never inspects `payload`; it only reads the position.
/// Points are immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct Point3D<P> {
    position: DVec3,
    payload: P,
}

impl<P> Point3D<P> {
    /// Create a point at `position`
    pub fn new(position: DVec3, payload: P) -> Self {
        Self { position, payload }
    }

    /// Create a point from individual coordinates
    pub fn from_xyz(x: f64, y: f64, z: f64, payload: P) -> Self {
        Self::new(DVec3::new(x, y, z), payload)
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consume the point and return its payload
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Euclidean distance from this point to `other`
    pub fn distance_to(&self, other: DVec3) -> f64 {
        self.position.distance(other)
    }
}
