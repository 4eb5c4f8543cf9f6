//! Catalog data sources: the bundled sample and the HTTP listings feed.

pub mod feed;
pub mod sample;

pub use feed::{FeedClient, API_URL_ENV};
pub use sample::{sample_listings, sample_price_trends};
