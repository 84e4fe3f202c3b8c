//! In-memory star catalog acting as the index's point source

use rayon::prelude::*;

use crate::core::types::{DVec3, Result};
use crate::spatial::Point3D;
use crate::visibility::PointSource;
use super::config::CatalogConfig;
use super::record::StarRecord;
use super::transform::CelestialTransform;

/// Handle to a star in a [`StarCatalog`]; the payload of indexed points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StarId(pub u32);

impl StarId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Ordered, capped list of catalog records with precomputed positions.
#[derive(Clone, Debug)]
pub struct StarCatalog {
    records: Vec<StarRecord>,
    /// Index-space position per record
    positions: Vec<DVec3>,
    transform: CelestialTransform,
}

impl StarCatalog {
    /// Build a catalog, keeping at most `config.max_stars` records.
    pub fn from_records(mut records: Vec<StarRecord>, config: &CatalogConfig) -> Result<Self> {
        config.validate()?;

        let cap = config.max_stars.min(u32::MAX as usize);
        if records.len() > cap {
            log::info!("Reached max stars: {} ({} records dropped)", cap, records.len() - cap);
            records.truncate(cap);
        }

        let transform = CelestialTransform::from_config(config);
        let positions: Vec<DVec3> = records
            .par_iter()
            .map(|r| transform.apply(r.ra_hours, r.dec_deg, r.parallax_mas))
            .collect();

        let invalid = positions.iter().filter(|p| !p.is_finite()).count();
        if invalid > 0 {
            log::warn!("{} catalog records have non-finite coordinates", invalid);
        }
        log::info!("Total stars parsed: {}", records.len());

        Ok(Self {
            records,
            positions,
            transform,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Transform the catalog was built with
    pub fn transform(&self) -> CelestialTransform {
        self.transform
    }

    /// Get a record by id
    pub fn record(&self, id: StarId) -> Option<&StarRecord> {
        self.records.get(id.as_usize())
    }

    /// Index-space position of a star
    pub fn position(&self, id: StarId) -> Option<DVec3> {
        self.positions.get(id.as_usize()).copied()
    }

    /// Find a star by its catalog source identifier
    pub fn find_source(&self, source: &str) -> Option<(StarId, &StarRecord)> {
        self.records
            .iter()
            .position(|r| r.source == source)
            .map(|i| (StarId(i as u32), &self.records[i]))
    }

    /// Iterate over all records with their ids
    pub fn iter(&self) -> impl Iterator<Item = (StarId, &StarRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (StarId(i as u32), r))
    }
}

impl PointSource for StarCatalog {
    type Payload = StarId;

    fn total_available(&self) -> usize {
        self.records.len()
    }

    fn points(&self, start: usize, count: usize) -> Vec<Point3D<StarId>> {
        let start = start.min(self.positions.len());
        let end = start.saturating_add(count).min(self.positions.len());
        (start..end)
            .map(|i| Point3D::new(self.positions[i], StarId(i as u32)))
            .collect()
    }
}
