//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - estimator inputs/outputs (`ListingRecord`, `Estimation`, `Confidence`)
//! - dashboard listing rows (`CarListing`) and their enums
//! - table query enums (`SortField`, `SortOrder`) and aggregate outputs

pub mod types;

pub use types::*;
