//! Shared catalog-loading logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the source precedence:
//! `--catalog` file -> `--feed` -> `ECAY_CATALOG` -> bundled sample
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::catalog::{Catalog, CatalogSource, sanitize};
use crate::cli::SourceArgs;
use crate::data::{FeedClient, sample_listings};
use crate::error::AppError;

/// Environment variable naming a default catalog JSON file.
pub const CATALOG_ENV: &str = "ECAY_CATALOG";

/// Resolve the catalog source from flags and environment, then load it.
pub fn load_catalog(args: &SourceArgs) -> Result<Catalog, AppError> {
    dotenvy::dotenv().ok();

    if let Some(path) = &args.catalog {
        return load_file(path);
    }
    if args.feed {
        let client = FeedClient::from_env()?;
        return load_feed(&client);
    }
    if let Ok(path) = std::env::var(CATALOG_ENV) {
        if !path.trim().is_empty() {
            return load_file(&PathBuf::from(path));
        }
    }

    let catalog = Catalog::from_listings(CatalogSource::Sample, sample_listings());
    info!(listings = catalog.listings.len(), "using bundled sample catalog");
    Ok(catalog)
}

fn load_file(path: &Path) -> Result<Catalog, AppError> {
    let catalog = crate::io::read_catalog_json(path)?;
    info!(
        path = %path.display(),
        listings = catalog.listings.len(),
        comparables = catalog.records.len(),
        "loaded catalog file"
    );
    Ok(catalog)
}

/// Load comparables from the feed; the dashboard rows stay on the bundled sample.
///
/// An empty feed, or one where every listing is dropped as incomplete, falls
/// back to the sample comparables.
pub fn load_feed(client: &FeedClient) -> Result<Catalog, AppError> {
    let raw = client.fetch_listings()?;
    Ok(catalog_from_feed(client.base_url(), &raw))
}

fn catalog_from_feed(base_url: &str, raw: &[crate::catalog::RawListing]) -> Catalog {
    let report = sanitize(raw);
    if report.dropped > 0 {
        warn!(dropped = report.dropped, "dropped incomplete feed listings");
    }

    if report.records.is_empty() {
        if raw.is_empty() {
            warn!("feed returned no listings; using bundled sample comparables");
        } else {
            warn!(dropped = report.dropped, "feed listings were all incomplete; using bundled sample comparables");
        }
        return Catalog::from_listings(CatalogSource::Sample, sample_listings());
    }

    Catalog {
        source: CatalogSource::Feed(base_url.to_string()),
        listings: sample_listings(),
        records: report.records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RawListing, RawMileage};

    #[test]
    fn empty_feed_falls_back_to_sample() {
        let catalog = catalog_from_feed("http://feed", &[]);
        assert_eq!(catalog.source, CatalogSource::Sample);
        assert_eq!(catalog.records.len(), 24);
    }

    #[test]
    fn fully_dropped_feed_falls_back_to_sample() {
        let raw = vec![
            RawListing {
                make: "Toyota".to_string(),
                model: "Camry".to_string(),
                price: 26000.0,
                mileage: Some(RawMileage::Number(30000.0)),
                ..RawListing::default()
            },
            RawListing {
                make: "Toyota".to_string(),
                model: "Camry".to_string(),
                year: Some(2021),
                price: 0.0,
                mileage: Some(RawMileage::Text("30,000 miles".to_string())),
                ..RawListing::default()
            },
        ];
        let catalog = catalog_from_feed("http://feed", &raw);
        assert_eq!(catalog.source, CatalogSource::Sample);
        assert_eq!(catalog.records.len(), 24);
        assert_eq!(catalog.listings.len(), 24);
    }

    #[test]
    fn feed_records_replace_comparables_only() {
        let raw = vec![RawListing {
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: Some(2021),
            price: 26000.0,
            mileage: Some(RawMileage::Number(30000.0)),
            ..RawListing::default()
        }];
        let catalog = catalog_from_feed("http://feed", &raw);
        assert_eq!(catalog.source, CatalogSource::Feed("http://feed".to_string()));
        assert_eq!(catalog.records.len(), 1);
        assert_eq!(catalog.listings.len(), 24);
    }

    #[test]
    fn catalog_flag_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        let sample = Catalog::from_listings(CatalogSource::Sample, sample_listings());
        crate::io::write_catalog_json(&path, &sample).unwrap();

        let args = SourceArgs {
            catalog: Some(path.clone()),
            feed: true,
        };
        let catalog = load_catalog(&args).unwrap();
        assert_eq!(catalog.source, CatalogSource::File(path.display().to_string()));
    }
}
