//! Celestial (RA/Dec/parallax) to Cartesian conversion

use crate::core::types::DVec3;
use super::config::CatalogConfig;

/// Distance implied by a parallax in milliarcseconds.
///
/// Non-positive or non-finite parallax yields `fallback` instead of dividing.
pub fn parallax_distance(parallax_mas: f64, fallback: f64) -> f64 {
    if parallax_mas.is_finite() && parallax_mas > 0.0 {
        1.0 / parallax_mas
    } else {
        fallback
    }
}

/// Convert a sky position to index space.
///
/// # Arguments
/// * `ra_hours` - Right ascension in hours (converted with 15 degrees per hour)
/// * `dec_deg` - Declination in degrees
/// * `parallax_mas` - Parallax in milliarcseconds, may be zero or negative
/// * `scale` - Global distance scaling factor
/// * `fallback` - Distance substituted for unusable parallax
pub fn celestial_to_cartesian(
    ra_hours: f64,
    dec_deg: f64,
    parallax_mas: f64,
    scale: f64,
    fallback: f64,
) -> DVec3 {
    let distance = parallax_distance(parallax_mas, fallback) * scale;
    let phi = (ra_hours * 15.0).to_radians();
    let theta = dec_deg.to_radians();

    DVec3::new(
        theta.cos() * phi.cos(),
        theta.cos() * phi.sin(),
        theta.sin(),
    ) * distance
}

/// The transform with its parameters bound from a [`CatalogConfig`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelestialTransform {
    pub scale: f64,
    pub fallback_distance: f64,
}

impl CelestialTransform {
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            scale: config.distance_scaling_factor,
            fallback_distance: config.fallback_distance,
        }
    }

    pub fn apply(&self, ra_hours: f64, dec_deg: f64, parallax_mas: f64) -> DVec3 {
        celestial_to_cartesian(ra_hours, dec_deg, parallax_mas, self.scale, self.fallback_distance)
    }
}
