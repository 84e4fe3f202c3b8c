//! Session configuration loaded from JSON

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogConfig;
use crate::spatial::OctreeConfig;
use crate::visibility::VisibilityConfig;
use super::types::Result;

/// Everything needed to set up one viewing session.
///
/// Every section falls back to its defaults when missing from the file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub octree: OctreeConfig,
    pub visibility: VisibilityConfig,
    pub catalog: CatalogConfig,
}

impl StarfieldConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: StarfieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.octree.validate()?;
        self.visibility.validate()?;
        self.catalog.validate()?;
        Ok(())
    }
}
