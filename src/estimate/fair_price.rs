//! Tiered comparable-matching fair-price estimator.
//!
//! The estimate is built in three steps:
//! - pick a base price from the requested model's listings if there are any,
//!   otherwise from every listing of the make
//! - shift it linearly by the year and mileage distance from the make's averages
//! - derive a ±10% range from the unrounded result
//!
//! The number of exact model matches decides the confidence tier.

use crate::domain::{Confidence, Estimation, VehicleRecord};

/// Dollars added per model year above the make's average year.
pub const YEAR_ADJUSTMENT_PER_YEAR: f64 = 1500.0;
/// Dollars removed per `MILEAGE_STEP` miles above the make's average mileage.
pub const MILEAGE_ADJUSTMENT_PER_STEP: f64 = 800.0;
pub const MILEAGE_STEP: f64 = 10_000.0;
/// Half-width of the price range, as a fraction of the estimate.
pub const RANGE_BAND: f64 = 0.10;

/// Estimate a fair price for `(make, model, year, mileage)` from `catalog`.
///
/// Returns `None` when the catalog has no listing of `make`; there is no
/// fallback to other makes. Matching is exact on make and model strings.
///
/// Callers are expected to have validated the catalog (positive prices,
/// non-negative mileage) and the inputs (non-empty make, numeric mileage).
pub fn estimate<R: VehicleRecord>(
    catalog: &[R],
    make: &str,
    model: &str,
    year: i32,
    mileage: f64,
) -> Option<Estimation> {
    let comparables: Vec<&R> = catalog.iter().filter(|r| r.make() == make).collect();
    if comparables.is_empty() {
        return None;
    }

    let exact_matches: Vec<&R> = comparables
        .iter()
        .copied()
        .filter(|r| r.model() == model)
        .collect();

    let (mut base_price, confidence) = match exact_matches.as_slice() {
        [] => (mean(comparables.iter().map(|r| r.price())), Confidence::Low),
        [single] => (single.price(), Confidence::Medium),
        many => (mean(many.iter().map(|r| r.price())), Confidence::High),
    };

    let avg_year = mean(comparables.iter().map(|r| f64::from(r.year())));
    base_price += (f64::from(year) - avg_year) * YEAR_ADJUSTMENT_PER_YEAR;

    let avg_mileage = mean(comparables.iter().map(|r| r.mileage()));
    base_price -= ((mileage - avg_mileage) / MILEAGE_STEP) * MILEAGE_ADJUSTMENT_PER_STEP;

    Some(Estimation {
        estimated_price: base_price.round() as i64,
        price_range: (
            (base_price * (1.0 - RANGE_BAND)).round() as i64,
            (base_price * (1.0 + RANGE_BAND)).round() as i64,
        ),
        confidence,
        comparable_count: comparables.len(),
    })
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        return 0.0;
    }
    sum / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListingRecord;

    fn toyota_catalog() -> Vec<ListingRecord> {
        vec![
            ListingRecord::new("Toyota", "Camry", 2022, 28500.0, 15000.0),
            ListingRecord::new("Toyota", "Corolla", 2023, 21000.0, 6000.0),
            ListingRecord::new("Toyota", "RAV4", 2021, 29800.0, 25000.0),
        ]
    }

    fn honda_catalog() -> Vec<ListingRecord> {
        vec![
            ListingRecord::new("Honda", "Civic", 2021, 20000.0, 20000.0),
            ListingRecord::new("Honda", "Civic", 2023, 24000.0, 10000.0),
            ListingRecord::new("Honda", "Accord", 2022, 28000.0, 15000.0),
        ]
    }

    #[test]
    fn single_exact_match_is_medium() {
        let est = estimate(&toyota_catalog(), "Toyota", "Camry", 2022, 15000.0).unwrap();
        assert_eq!(est.confidence, Confidence::Medium);
        assert_eq!(est.comparable_count, 3);
        // 28500 + 0 (year) + 800 * (15333.3 - 15000) / 10000
        assert_eq!(est.estimated_price, 28527);
        assert_eq!(est.price_range, (25674, 31379));
    }

    #[test]
    fn two_exact_matches_average_to_high() {
        let est = estimate(&honda_catalog(), "Honda", "Civic", 2022, 15000.0).unwrap();
        assert_eq!(est.confidence, Confidence::High);
        assert_eq!(est.estimated_price, 22000);
        assert_eq!(est.price_range, (19800, 24200));
    }

    #[test]
    fn no_exact_match_falls_back_to_make_mean() {
        let est = estimate(&honda_catalog(), "Honda", "Pilot", 2024, 5000.0).unwrap();
        assert_eq!(est.confidence, Confidence::Low);
        // 24000 + 2 * 1500 + 800
        assert_eq!(est.estimated_price, 27800);
        assert_eq!(est.price_range, (25020, 30580));
        assert_eq!(est.comparable_count, 3);
    }

    #[test]
    fn empty_model_degenerates_to_low() {
        let est = estimate(&honda_catalog(), "Honda", "", 2022, 15000.0).unwrap();
        assert_eq!(est.confidence, Confidence::Low);
        assert_eq!(est.estimated_price, 24000);
    }

    #[test]
    fn absent_make_is_not_available() {
        assert!(estimate(&toyota_catalog(), "Ferrari", "F8", 2022, 1000.0).is_none());
        assert!(estimate::<ListingRecord>(&[], "Toyota", "Camry", 2022, 0.0).is_none());
    }

    #[test]
    fn make_and_model_match_exactly() {
        assert!(estimate(&toyota_catalog(), "toyota", "Camry", 2022, 15000.0).is_none());
        let est = estimate(&toyota_catalog(), "Toyota", "camry", 2022, 15000.0).unwrap();
        assert_eq!(est.confidence, Confidence::Low);
    }

    #[test]
    fn other_makes_do_not_shift_the_baseline() {
        let mut catalog = toyota_catalog();
        catalog.push(ListingRecord::new("BMW", "X3", 2010, 90000.0, 200000.0));
        let with_noise = estimate(&catalog, "Toyota", "Camry", 2022, 15000.0);
        let without = estimate(&toyota_catalog(), "Toyota", "Camry", 2022, 15000.0);
        assert_eq!(with_noise, without);
    }

    #[test]
    fn newer_and_lower_mileage_raise_the_estimate() {
        let catalog = toyota_catalog();
        let base = estimate(&catalog, "Toyota", "Camry", 2022, 15000.0).unwrap();
        let newer = estimate(&catalog, "Toyota", "Camry", 2024, 15000.0).unwrap();
        let driven = estimate(&catalog, "Toyota", "Camry", 2022, 35000.0).unwrap();
        assert_eq!(newer.estimated_price - base.estimated_price, 3000);
        assert_eq!(base.estimated_price - driven.estimated_price, 1600);
    }
}
