//! Catalog ingestion configuration.

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Parameters applied while turning catalog records into index points.
///
/// Changing `distance_scaling_factor` or `fallback_distance` changes the
/// metric space of the index, so an index built with other values must be
/// rebuilt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Hard cap on records kept from the input
    pub max_stars: usize,
    /// Global coordinate scale applied to every distance
    pub distance_scaling_factor: f64,
    /// Distance used when parallax is missing, zero or negative
    pub fallback_distance: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_stars: 10_000,
            distance_scaling_factor: 1_000.0,
            fallback_distance: 1_000.0,
        }
    }
}

impl CatalogConfig {
    /// Reject non-positive or non-finite scales
    pub fn validate(&self) -> Result<()> {
        if !(self.distance_scaling_factor.is_finite() && self.distance_scaling_factor > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "distance_scaling_factor must be finite and positive, got {}",
                self.distance_scaling_factor
            )));
        }
        if !(self.fallback_distance.is_finite() && self.fallback_distance > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "fallback_distance must be finite and positive, got {}",
                self.fallback_distance
            )));
        }
        Ok(())
    }
}
