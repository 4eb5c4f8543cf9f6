//! HTTP listings feed (scraper output served as JSON).

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::catalog::RawListing;
use crate::error::AppError;

/// Environment variable holding the feed base URL.
pub const API_URL_ENV: &str = "ECAY_API_URL";

const LISTINGS_PATH: &str = "listings";

pub struct FeedClient {
    client: Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(API_URL_ENV)
            .map_err(|_| AppError::input(format!("Missing {API_URL_ENV} in environment (.env).")))?;
        Ok(Self::new(base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the listings endpoint.
    pub fn listings_url(&self) -> String {
        format!("{}/{LISTINGS_PATH}", self.base_url.trim_end_matches('/'))
    }

    /// Fetch every listing the feed currently serves.
    pub fn fetch_listings(&self) -> Result<Vec<RawListing>, AppError> {
        let url = self.listings_url();
        debug!(%url, "requesting listings feed");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::runtime(format!("Listings request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::runtime(format!(
                "Listings request failed with status {}.",
                resp.status()
            )));
        }

        let listings: Vec<RawListing> = resp
            .json()
            .map_err(|e| AppError::runtime(format!("Failed to parse listings response: {e}")))?;

        info!(count = listings.len(), %url, "fetched listings feed");
        Ok(listings)
    }
}
