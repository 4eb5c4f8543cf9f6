//! The in-memory catalog and everything derived from it.
//!
//! - cascading selection projections (`derive`)
//! - feed validation and input parsing (`sanitize`)
//! - listings table query (`table`)
//! - KPI summary and chart series (`stats`)

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{CarListing, ListingRecord};

pub mod derive;
pub mod sanitize;
pub mod stats;
pub mod table;

pub use derive::*;
pub use sanitize::*;
pub use stats::*;
pub use table::*;

/// Where the comparables came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Sample,
    File(String),
    Feed(String),
}

impl CatalogSource {
    pub fn label(&self) -> String {
        match self {
            CatalogSource::Sample => "bundled sample".to_string(),
            CatalogSource::File(path) => format!("file {path}"),
            CatalogSource::Feed(url) => format!("feed {url}"),
        }
    }
}

/// Dashboard rows plus the validated comparables the estimator runs on.
///
/// The two usually describe the same listings, but a live feed only carries
/// the estimator fields, so the dashboard keeps showing its own rows.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub source: CatalogSource,
    pub listings: Vec<CarListing>,
    pub records: Vec<ListingRecord>,
}

impl Catalog {
    /// Catalog whose comparables are the dashboard rows themselves.
    ///
    /// Rows that break the record invariants stay on the dashboard but are
    /// left out of the comparables.
    pub fn from_listings(source: CatalogSource, listings: Vec<CarListing>) -> Self {
        let report = sanitize_records(listings.iter().map(CarListing::to_record));
        if report.dropped > 0 {
            warn!(dropped = report.dropped, source = %source.label(), "excluded invalid listings from comparables");
        }
        Self {
            source,
            listings,
            records: report.records,
        }
    }

    pub fn makes(&self) -> Vec<String> {
        distinct_makes(&self.records)
    }

    pub fn models(&self, make: &str) -> Vec<String> {
        models_for_make(&self.records, make)
    }

    pub fn years(&self, make: &str, model: &str) -> Vec<i32> {
        years_for_make_model(&self.records, make, model)
    }
}
