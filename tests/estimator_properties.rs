//! Property-based tests for the fair-price estimator.
//!
//! These tests verify that:
//! - A make missing from the catalog never produces an estimate
//! - The confidence tier follows the number of exact model matches
//! - The estimate and range are rounded independently from the unrounded base
//! - Repeated calls produce identical output

use ecay_tracker::domain::{Confidence, Estimation, ListingRecord};
use ecay_tracker::estimate::{
    MILEAGE_ADJUSTMENT_PER_STEP, MILEAGE_STEP, RANGE_BAND, YEAR_ADJUSTMENT_PER_YEAR, estimate,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const MODELS: [&str; 3] = ["Camry", "Corolla", "RAV4"];

/// Strategy for a Toyota catalog with some Honda noise mixed in.
fn arb_catalog() -> impl Strategy<Value = Vec<ListingRecord>> {
    let toyota = prop::collection::vec(
        (0usize..MODELS.len(), 30_000u32..60_000, 2015i32..2025, 0u32..100_000),
        1..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(m, price, year, mileage)| {
                ListingRecord::new("Toyota", MODELS[m], year, f64::from(price), f64::from(mileage))
            })
            .collect::<Vec<_>>()
    });
    let honda = prop::collection::vec((15_000u32..40_000, 0u32..80_000), 0..5).prop_map(|rows| {
        rows.into_iter()
            .map(|(price, mileage)| ListingRecord::new("Honda", "Civic", 2021, f64::from(price), f64::from(mileage)))
            .collect::<Vec<_>>()
    });
    (toyota, honda).prop_map(|(mut t, h)| {
        t.extend(h);
        t
    })
}

fn arb_request() -> impl Strategy<Value = (usize, i32, u32)> {
    (0usize..MODELS.len(), 2015i32..2025, 0u32..100_000)
}

fn mean<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    sum / n as f64
}

/// The adjusted price before any rounding, recomputed from the catalog.
fn unrounded_base(catalog: &[ListingRecord], make: &str, model: &str, year: i32, mileage: f64) -> f64 {
    let same_make: Vec<&ListingRecord> = catalog.iter().filter(|r| r.make == make).collect();
    let exact: Vec<f64> = same_make.iter().filter(|r| r.model == model).map(|r| r.price).collect();
    let prices: Vec<f64> = same_make.iter().map(|r| r.price).collect();
    let years: Vec<f64> = same_make.iter().map(|r| f64::from(r.year)).collect();
    let miles: Vec<f64> = same_make.iter().map(|r| r.mileage).collect();

    let mut base = match exact.as_slice() {
        [] => mean(prices.iter()),
        [single] => *single,
        many => mean(many.iter()),
    };
    base += (f64::from(year) - mean(years.iter())) * YEAR_ADJUSTMENT_PER_YEAR;
    base -= ((mileage - mean(miles.iter())) / MILEAGE_STEP) * MILEAGE_ADJUSTMENT_PER_STEP;
    base
}

proptest! {
    #[test]
    fn absent_make_is_none(catalog in arb_catalog(), (m, year, mileage) in arb_request()) {
        prop_assert!(estimate(&catalog, "Ferrari", MODELS[m], year, f64::from(mileage)).is_none());
        // Matching is case-sensitive.
        prop_assert!(estimate(&catalog, "toyota", MODELS[m], year, f64::from(mileage)).is_none());
    }

    #[test]
    fn repeated_calls_are_identical(catalog in arb_catalog(), (m, year, mileage) in arb_request()) {
        let first = estimate(&catalog, "Toyota", MODELS[m], year, f64::from(mileage));
        let second = estimate(&catalog, "Toyota", MODELS[m], year, f64::from(mileage));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn confidence_follows_exact_matches(catalog in arb_catalog(), (m, year, mileage) in arb_request()) {
        let est = estimate(&catalog, "Toyota", MODELS[m], year, f64::from(mileage)).unwrap();
        let exact = catalog.iter().filter(|r| r.make == "Toyota" && r.model == MODELS[m]).count();
        let expected = match exact {
            0 => Confidence::Low,
            1 => Confidence::Medium,
            _ => Confidence::High,
        };
        prop_assert_eq!(est.confidence, expected);
        prop_assert_eq!(est.comparable_count, catalog.iter().filter(|r| r.make == "Toyota").count());
    }

    #[test]
    fn range_is_band_around_unrounded_base(catalog in arb_catalog(), (m, year, mileage) in arb_request()) {
        let mileage = f64::from(mileage);
        let est = estimate(&catalog, "Toyota", MODELS[m], year, mileage).unwrap();
        let base = unrounded_base(&catalog, "Toyota", MODELS[m], year, mileage);
        prop_assert_eq!(est.estimated_price, base.round() as i64);
        prop_assert_eq!(est.price_range.0, (base * (1.0 - RANGE_BAND)).round() as i64);
        prop_assert_eq!(est.price_range.1, (base * (1.0 + RANGE_BAND)).round() as i64);
    }
}

#[test]
fn high_confidence_without_adjustments_is_rounded_mean() {
    let catalog = vec![
        ListingRecord::new("Mazda", "CX-5", 2021, 27_001.0, 20_000.0),
        ListingRecord::new("Mazda", "CX-5", 2021, 27_500.0, 20_000.0),
        ListingRecord::new("Mazda", "CX-5", 2021, 28_000.0, 20_000.0),
    ];
    let est = estimate(&catalog, "Mazda", "CX-5", 2021, 20_000.0).unwrap();
    assert_eq!(
        est,
        Estimation {
            estimated_price: 27_500,
            price_range: (24_750, 30_250),
            confidence: Confidence::High,
            comparable_count: 3,
        }
    );
}

#[test]
fn single_match_keeps_its_price_as_base() {
    let catalog = vec![
        ListingRecord::new("Toyota", "Camry", 2022, 28_500.0, 15_000.0),
        ListingRecord::new("Toyota", "Corolla", 2023, 21_000.0, 6_000.0),
        ListingRecord::new("Toyota", "RAV4", 2021, 29_800.0, 25_000.0),
    ];
    let est = estimate(&catalog, "Toyota", "Camry", 2022, 15_000.0).unwrap();
    assert_eq!(
        est,
        Estimation {
            estimated_price: 28_527,
            price_range: (25_674, 31_379),
            confidence: Confidence::Medium,
            comparable_count: 3,
        }
    );
}

#[test]
fn unknown_model_uses_make_mean() {
    let catalog = vec![
        ListingRecord::new("Ford", "F-150", 2020, 40_000.0, 30_000.0),
        ListingRecord::new("Ford", "Explorer", 2020, 30_000.0, 30_000.0),
    ];
    let est = estimate(&catalog, "Ford", "Bronco", 2020, 30_000.0).unwrap();
    assert_eq!(est.confidence, Confidence::Low);
    assert_eq!(est.estimated_price, 35_000);
    assert_eq!(est.price_range, (31_500, 38_500));
}

#[test]
fn negative_base_keeps_independent_rounding() {
    let catalog = vec![ListingRecord::new("Toyota", "Camry", 2022, 5_000.0, 10_000.0)];
    // 5000 - 32 years * 1500 - 49 steps * 800
    let est = estimate(&catalog, "Toyota", "Camry", 1990, 500_000.0).unwrap();
    assert_eq!(
        est,
        Estimation {
            estimated_price: -82_200,
            price_range: (-73_980, -90_420),
            confidence: Confidence::Medium,
            comparable_count: 1,
        }
    );
    // The band no longer brackets the estimate once the base is negative.
    assert!(est.price_range.0 > est.estimated_price);
    assert!(est.price_range.1 < est.estimated_price);
}
