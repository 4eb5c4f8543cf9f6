//! Read/write catalog JSON files.
//!
//! A catalog file is the portable form of the dashboard data:
//! - `listings`: full dashboard rows
//! - `feed`: optional raw feed records (scraper output) used as comparables
//!
//! When `feed` is empty the dashboard rows double as comparables.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::{Catalog, CatalogSource, RawListing, sanitize};
use crate::domain::CarListing;
use crate::error::AppError;

/// On-disk catalog schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default = "default_tool")]
    pub tool: String,
    #[serde(default)]
    pub listings: Vec<CarListing>,
    #[serde(default)]
    pub feed: Vec<RawListing>,
}

fn default_tool() -> String {
    "ecay".to_string()
}

impl CatalogFile {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            tool: default_tool(),
            listings: catalog.listings.clone(),
            feed: Vec::new(),
        }
    }

    /// Build the in-memory catalog, validating any feed records.
    pub fn into_catalog(self, path: &Path) -> Result<Catalog, AppError> {
        let source = CatalogSource::File(path.display().to_string());
        if self.feed.is_empty() {
            if self.listings.is_empty() {
                return Err(AppError::input(format!(
                    "Catalog '{}' contains no listings.",
                    path.display()
                )));
            }
            return Ok(Catalog::from_listings(source, self.listings));
        }

        let report = sanitize(&self.feed);
        if report.dropped > 0 {
            warn!(dropped = report.dropped, path = %path.display(), "dropped incomplete feed records");
        }
        Ok(Catalog {
            source,
            listings: self.listings,
            records: report.records,
        })
    }
}

/// Write a catalog JSON file.
pub fn write_catalog_json(path: &Path, catalog: &Catalog) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::runtime(format!("Failed to create catalog JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &CatalogFile::from_catalog(catalog))
        .map_err(|e| AppError::runtime(format!("Failed to write catalog JSON: {e}")))?;

    info!(path = %path.display(), listings = catalog.listings.len(), "wrote catalog");
    Ok(())
}

/// Read a catalog JSON file.
pub fn read_catalog_json(path: &Path) -> Result<Catalog, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open catalog JSON '{}': {e}", path.display())))?;
    let parsed: CatalogFile = serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid catalog JSON '{}': {e}", path.display())))?;
    parsed.into_catalog(path)
}
