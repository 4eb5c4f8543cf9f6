//! KPI summary and chart series derived from the listings.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::Duration;

use crate::domain::{BodyTypeStat, CarListing, DealRating, KpiSummary, MileagePricePoint, VolumePoint};

/// Width of the "new this week" window, ending at the latest listed date.
const NEW_LISTING_WINDOW_DAYS: i64 = 7;

pub fn kpi_summary(listings: &[CarListing]) -> KpiSummary {
    if listings.is_empty() {
        return KpiSummary {
            total_listings: 0,
            avg_price: 0.0,
            median_price: 0.0,
            avg_mileage: 0.0,
            new_this_week: 0,
            great_deals: 0,
        };
    }

    let n = listings.len() as f64;
    let avg_price = listings.iter().map(|l| l.price).sum::<f64>() / n;
    let avg_mileage = listings.iter().map(|l| l.mileage).sum::<f64>() / n;

    let mut prices: Vec<f64> = listings.iter().map(|l| l.price).collect();
    prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = prices.len() / 2;
    let median_price = if prices.len() % 2 == 0 {
        (prices[mid - 1] + prices[mid]) / 2.0
    } else {
        prices[mid]
    };

    let new_this_week = match listings.iter().map(|l| l.listed_date).max() {
        Some(latest) => {
            let cutoff = latest - Duration::days(NEW_LISTING_WINDOW_DAYS);
            listings.iter().filter(|l| l.listed_date > cutoff).count()
        }
        None => 0,
    };

    let great_deals = listings
        .iter()
        .filter(|l| l.deal_rating == DealRating::GreatDeal)
        .count();

    KpiSummary {
        total_listings: listings.len(),
        avg_price,
        median_price,
        avg_mileage,
        new_this_week,
        great_deals,
    }
}

pub fn mileage_price_points(listings: &[CarListing]) -> Vec<MileagePricePoint> {
    listings
        .iter()
        .map(|l| MileagePricePoint {
            mileage: l.mileage,
            price: l.price,
            make: l.make.clone(),
        })
        .collect()
}

/// Count and average price per body type, most common first.
pub fn body_type_distribution(listings: &[CarListing]) -> Vec<BodyTypeStat> {
    let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for l in listings {
        let entry = groups.entry(l.body_type.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += l.price;
    }

    let mut out: Vec<BodyTypeStat> = groups
        .into_iter()
        .map(|(body_type, (count, total))| BodyTypeStat {
            body_type: body_type.to_string(),
            count,
            avg_price: total / count as f64,
        })
        .collect();
    // BTreeMap order breaks count ties alphabetically.
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Listings per `YYYY-MM`, oldest month first.
pub fn listing_volume_by_month(listings: &[CarListing]) -> Vec<VolumePoint> {
    let mut months: BTreeMap<String, usize> = BTreeMap::new();
    for l in listings {
        *months.entry(l.listed_date.format("%Y-%m").to_string()).or_default() += 1;
    }
    months
        .into_iter()
        .map(|(month, listings)| VolumePoint { month, listings })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_listings;

    #[test]
    fn kpis_over_sample() {
        let kpi = kpi_summary(&sample_listings());
        assert_eq!(kpi.total_listings, 24);
        assert_eq!(kpi.great_deals, 13);
        assert_eq!(kpi.median_price, 30600.0);
        assert!((kpi.avg_price - 33595.833333).abs() < 1e-3);
        assert!((kpi.avg_mileage - 19583.333333).abs() < 1e-3);
        // 2026-02-12 ..= 2026-02-18
        assert_eq!(kpi.new_this_week, 7);
    }

    #[test]
    fn kpis_over_empty_catalog_are_zero() {
        let kpi = kpi_summary(&[]);
        assert_eq!(kpi.total_listings, 0);
        assert_eq!(kpi.median_price, 0.0);
    }

    #[test]
    fn body_types_sorted_by_count() {
        let dist = body_type_distribution(&sample_listings());
        let summary: Vec<(&str, usize)> = dist.iter().map(|d| (d.body_type.as_str(), d.count)).collect();
        assert_eq!(summary, vec![("SUV", 14), ("Sedan", 7), ("Truck", 3)]);
    }

    #[test]
    fn volume_by_month_is_chronological() {
        let volume = listing_volume_by_month(&sample_listings());
        assert_eq!(
            volume,
            vec![
                VolumePoint { month: "2026-01".to_string(), listings: 6 },
                VolumePoint { month: "2026-02".to_string(), listings: 18 },
            ]
        );
    }
}
