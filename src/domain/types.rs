//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during estimation and table queries
//! - loaded from / written to catalog JSON
//! - rendered by both the CLI reports and the TUI

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Read access to the fields the estimator and the selection helpers need.
///
/// Implemented by the minimal [`ListingRecord`] and by the dashboard's
/// [`CarListing`], so both can be fed to the same pure functions.
pub trait VehicleRecord {
    fn make(&self) -> &str;
    fn model(&self) -> &str;
    fn year(&self) -> i32;
    fn price(&self) -> f64;
    fn mileage(&self) -> f64;
}

/// A validated comparable listing.
///
/// Invariants (enforced by `catalog::sanitize`, never re-checked downstream):
/// non-empty make/model, `price > 0`, `mileage >= 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: f64,
}

impl ListingRecord {
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i32, price: f64, mileage: f64) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            price,
            mileage,
        }
    }
}

impl VehicleRecord for ListingRecord {
    fn make(&self) -> &str {
        &self.make
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn mileage(&self) -> f64 {
        self.mileage
    }
}

/// Qualitative label for how many exact model matches informed the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn display_name(self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }
}

/// Fair-price estimation output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimation {
    pub estimated_price: i64,
    /// `(low, high)`, both rounded from the unrounded adjusted price.
    pub price_range: (i64, i64),
    pub confidence: Confidence,
    /// Number of same-make records used as the adjustment baseline.
    pub comparable_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub fn display_name(self) -> &'static str {
        match self {
            Condition::Excellent => "Excellent",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transmission {
    Automatic,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Gasoline,
    Diesel,
    Hybrid,
    Electric,
}

/// How a listing's asking price compares with its fair price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealRating {
    #[serde(rename = "Great Deal")]
    GreatDeal,
    #[serde(rename = "Good Deal")]
    GoodDeal,
    #[serde(rename = "Fair Deal")]
    FairDeal,
    Overpriced,
}

impl DealRating {
    pub fn display_name(self) -> &'static str {
        match self {
            DealRating::GreatDeal => "Great Deal",
            DealRating::GoodDeal => "Good Deal",
            DealRating::FairDeal => "Fair Deal",
            DealRating::Overpriced => "Overpriced",
        }
    }
}

/// A full dashboard listing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarListing {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: f64,
    pub fair_price: f64,
    pub listed_date: NaiveDate,
    pub condition: Condition,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub body_type: String,
    pub deal_rating: DealRating,
}

impl CarListing {
    /// Asking price minus fair price.
    pub fn price_delta(&self) -> f64 {
        self.price - self.fair_price
    }

    /// Asking price relative to fair price, in percent.
    pub fn price_delta_pct(&self) -> f64 {
        if self.fair_price == 0.0 {
            return 0.0;
        }
        self.price_delta() / self.fair_price * 100.0
    }

    /// Comparable record for the estimator.
    ///
    /// The bundled dashboard data uses the fair price as the comparable price.
    pub fn to_record(&self) -> ListingRecord {
        ListingRecord::new(&self.make, &self.model, self.year, self.fair_price, self.mileage)
    }
}

/// Dashboard rows compare on their fair price, the same value `to_record` uses.
impl VehicleRecord for CarListing {
    fn make(&self) -> &str {
        &self.make
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn price(&self) -> f64 {
        self.fair_price
    }

    fn mileage(&self) -> f64 {
        self.mileage
    }
}

/// Listings table sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Price,
    Year,
    Mileage,
    /// Listing date.
    Listed,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Listed,
        SortField::Price,
        SortField::Year,
        SortField::Mileage,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Year => "year",
            SortField::Mileage => "mileage",
            SortField::Listed => "listed",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// One month of the static price trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTrendPoint {
    pub month: String,
    pub avg_price: f64,
    pub median_price: f64,
    pub listings: usize,
}

/// Dashboard KPI summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_listings: usize,
    pub avg_price: f64,
    pub median_price: f64,
    pub avg_mileage: f64,
    /// Listings in the 7 days ending at the most recent listed date.
    pub new_this_week: usize,
    pub great_deals: usize,
}

/// Per body-type aggregate for the distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTypeStat {
    pub body_type: String,
    pub count: usize,
    pub avg_price: f64,
}

/// Listings per calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub month: String,
    pub listings: usize,
}

/// One point of the mileage-vs-price scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileagePricePoint {
    pub mileage: f64,
    pub price: f64,
    pub make: String,
}

/// Default target year when the user has not picked one.
pub const DEFAULT_TARGET_YEAR: i32 = 2022;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_cycles_through_all() {
        let mut field = SortField::Listed;
        for _ in 0..SortField::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, SortField::Listed);
    }

    #[test]
    fn deal_rating_serializes_with_spaces() {
        let json = serde_json::to_string(&DealRating::GreatDeal).unwrap();
        assert_eq!(json, "\"Great Deal\"");
    }
}
