//! Star catalog ingestion: records, coordinate transform and point source

pub mod config;
pub mod record;
pub mod transform;
pub mod star_catalog;

pub use config::CatalogConfig;
pub use record::StarRecord;
pub use transform::{celestial_to_cartesian, parallax_distance, CelestialTransform};
pub use star_catalog::{StarCatalog, StarId};
