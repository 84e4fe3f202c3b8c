//! Star catalog record

use serde::{Deserialize, Serialize};

fn one() -> f64 {
    1.0
}

/// One star as delivered by the upstream parser.
///
/// Field aliases match the Gaia column headers so records deserialized from
/// a converted catalog export need no renaming.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Catalog source identifier
    #[serde(alias = "Source")]
    pub source: String,
    /// Right ascension (hours)
    #[serde(alias = "RA_ICRS")]
    pub ra_hours: f64,
    /// Declination (degrees)
    #[serde(alias = "DE_ICRS")]
    pub dec_deg: f64,
    /// Parallax (milliarcseconds); zero when unknown
    #[serde(alias = "Plx", default)]
    pub parallax_mas: f64,
    #[serde(alias = "Gmag", default)]
    pub g_mag: Option<f64>,
    #[serde(alias = "BPmag", default)]
    pub bp_mag: Option<f64>,
    #[serde(alias = "RPmag", default)]
    pub rp_mag: Option<f64>,
    /// Effective temperature (K)
    #[serde(alias = "Tefftemp", default)]
    pub teff: Option<f64>,
    /// Luminosity (solar units)
    #[serde(alias = "Lum-Flame", alias = "Lum-Flame Lsun", default = "one")]
    pub luminosity: f64,
    /// Radius (solar radii)
    #[serde(alias = "Rad", alias = "Rad solRad", default = "one")]
    pub radius: f64,
    /// BP-RP color index
    #[serde(alias = "BP-RP", default)]
    pub bp_rp: f64,
}

impl StarRecord {
    /// Record with only identity and astrometry set
    pub fn new(source: impl Into<String>, ra_hours: f64, dec_deg: f64, parallax_mas: f64) -> Self {
        Self {
            source: source.into(),
            ra_hours,
            dec_deg,
            parallax_mas,
            g_mag: None,
            bp_mag: None,
            rp_mag: None,
            teff: None,
            luminosity: 1.0,
            radius: 1.0,
            bp_rp: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_columns() {
        let rec: StarRecord = serde_json::from_str(
            r#"{"Source": "4295806720", "RA_ICRS": 3.1, "DE_ICRS": -12.5}"#,
        )
        .unwrap();
        assert_eq!(rec.source, "4295806720");
        assert_eq!(rec.parallax_mas, 0.0);
        assert_eq!(rec.radius, 1.0);
        assert_eq!(rec.luminosity, 1.0);
        assert_eq!(rec.bp_rp, 0.0);
        assert!(rec.g_mag.is_none());
    }

    #[test]
    fn test_new_matches_deserialized_defaults() {
        let rec = StarRecord::new("a", 1.0, 2.0, 3.0);
        let json = serde_json::to_string(&rec).unwrap();
        let back: StarRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, back);
    }
}
