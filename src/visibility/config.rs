//! Visibility and incremental-loading configuration.

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{DVec3, Result};

/// Render-side toggles.
///
/// They do not change which points are visible, but flipping one still goes
/// through the visibility recomputation so the renderer gets a fresh list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Color stars by their BP-RP index
    pub color_enabled: bool,
    /// Scale stars by their catalog radius
    pub radius_enabled: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            color_enabled: true,
            radius_enabled: true,
        }
    }
}

/// Configuration for a [`VisibilityManager`](super::VisibilityManager).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Radius of the visibility sphere around the camera
    pub max_distance: f64,
    /// Cumulative cap on points admitted into the index
    pub target_count: usize,
    /// Below this many visible points, more of the source is loaded
    pub min_visible_threshold: usize,
    /// Load once and recompute when an update finds the view sparse
    pub auto_load: bool,
    /// Render toggles carried along for the host
    pub display: DisplayOptions,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            max_distance: 10_000.0,
            target_count: 10_000,
            min_visible_threshold: 1_000,
            auto_load: true,
            display: DisplayOptions::default(),
        }
    }
}

impl VisibilityConfig {
    /// Reject configurations the manager cannot run with
    pub fn validate(&self) -> Result<()> {
        validate_max_distance(self.max_distance)
    }
}

pub(crate) fn validate_camera(camera: DVec3) -> Result<()> {
    if !camera.is_finite() {
        return Err(Error::InvalidConfig(format!(
            "camera position must be finite, got {:?}",
            camera
        )));
    }
    Ok(())
}

pub(crate) fn validate_max_distance(max_distance: f64) -> Result<()> {
    if !(max_distance.is_finite() && max_distance > 0.0) {
        return Err(Error::InvalidConfig(format!(
            "max_distance must be finite and positive, got {}",
            max_distance
        )));
    }
    Ok(())
}
