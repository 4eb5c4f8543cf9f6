//! Formatted terminal output: estimates, listings table, KPIs and chart series.
//!
//! We keep formatting code in one place so:
//! - the estimator and catalog code stay free of presentation concerns
//! - output changes are localized (important for snapshot-style tests)

use crate::domain::{BodyTypeStat, CarListing, Estimation, KpiSummary, PriceTrendPoint, VolumePoint};

/// Width of the longest bar in text charts.
const BAR_WIDTH: usize = 40;

/// The target vehicle an estimate was requested for.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateTarget<'a> {
    pub make: &'a str,
    pub model: &'a str,
    pub year: i32,
    pub mileage: f64,
}

/// Format a whole-dollar amount: `28527` → `$28,527`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// Format a count or distance with thousands separators: `15000` → `15,000`.
pub fn format_number(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(rounded.abs() as u64))
}

/// Signed percentage with one decimal: `5.55` → `+5.6%`, `-1.8` → `-1.8%`.
pub fn format_pct(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

fn group_thousands(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while n > 0 {
        groups.push(n % 1000);
        n /= 1000;
    }
    let mut out = String::new();
    for (i, g) in groups.iter().rev().enumerate() {
        if i == 0 {
            out.push_str(&g.to_string());
        } else {
            out.push_str(&format!(",{g:03}"));
        }
    }
    out
}

/// Format an estimate (or the "insufficient data" message when it is absent).
pub fn format_estimation(target: &EstimateTarget<'_>, estimation: Option<&Estimation>) -> String {
    let mut out = String::new();

    let model = if target.model.is_empty() { "(any model)" } else { target.model };
    out.push_str(&format!(
        "=== Fair Price Estimate: {} {} {} | {} mi ===\n",
        target.year,
        target.make,
        model,
        format_number(target.mileage)
    ));

    let Some(est) = estimation else {
        out.push_str(&format!("Insufficient data for make '{}'.\n", target.make));
        return out;
    };

    out.push_str(&format!(
        "Estimated fair price: {}\n",
        format_currency(est.estimated_price as f64)
    ));
    out.push_str(&format!(
        "Price range:          {} - {}\n",
        format_currency(est.price_range.0 as f64),
        format_currency(est.price_range.1 as f64)
    ));
    out.push_str(&format!("Confidence:           {}\n", est.confidence.display_name()));
    out.push_str(&format!(
        "Based on {} comparable listings\n",
        est.comparable_count
    ));
    out
}

/// Format the listings table.
pub fn format_listings_table(rows: &[&CarListing]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} vehicles found\n", rows.len()));
    out.push_str(
        format!(
            "{:<24} {:>4} {:>9} {:>9} {:>7} {:>9} {:<10} {:<11} {:<6}\n",
            "vehicle", "year", "price", "fair", "delta", "mileage", "condition", "deal", "listed"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<24} {:-<4} {:-<9} {:-<9} {:-<7} {:-<9} {:-<10} {:-<11} {:-<6}\n",
            "", "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for l in rows {
        let vehicle = format!("{} {}", l.make, l.model);
        out.push_str(
            format!(
                "{:<24} {:>4} {:>9} {:>9} {:>7} {:>9} {:<10} {:<11} {:<6}\n",
                truncate(&vehicle, 24),
                l.year,
                format_currency(l.price),
                format_currency(l.fair_price),
                format_pct(l.price_delta_pct()),
                format_number(l.mileage),
                l.condition.display_name(),
                l.deal_rating.display_name(),
                l.listed_date.format("%b %-d").to_string(),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format the KPI summary cards.
pub fn format_kpis(kpi: &KpiSummary) -> String {
    let mut out = String::new();
    out.push_str("=== Market KPIs ===\n");
    out.push_str(&format!("Total listings: {}\n", format_number(kpi.total_listings as f64)));
    out.push_str(&format!("Average price:  {}\n", format_currency(kpi.avg_price)));
    out.push_str(&format!("Median price:   {}\n", format_currency(kpi.median_price)));
    out.push_str(&format!("Avg mileage:    {} mi\n", format_number(kpi.avg_mileage)));
    out.push_str(&format!("New this week:  {}\n", kpi.new_this_week));
    out.push_str(&format!("Great deals:    {}\n", kpi.great_deals));
    out
}

/// Format the chart series as horizontal text bars.
pub fn format_charts(
    body_types: &[BodyTypeStat],
    volume: &[VolumePoint],
    trends: &[PriceTrendPoint],
) -> String {
    let mut out = String::new();

    out.push_str("Body type distribution:\n");
    let max = body_types.iter().map(|b| b.count).max().unwrap_or(0);
    for b in body_types {
        out.push_str(&format!(
            "{:<10} {:<width$} {:>3}  avg {}\n",
            truncate(&b.body_type, 10),
            bar(b.count as f64, max as f64),
            b.count,
            format_currency(b.avg_price),
            width = BAR_WIDTH,
        ));
    }

    out.push_str("\nListing volume:\n");
    let max = volume.iter().map(|v| v.listings).max().unwrap_or(0);
    for v in volume {
        out.push_str(&format!(
            "{:<10} {:<width$} {:>3}\n",
            v.month,
            bar(v.listings as f64, max as f64),
            v.listings,
            width = BAR_WIDTH,
        ));
    }

    out.push_str("\nPrice trend:\n");
    out.push_str(&format!("{:<10} {:>9} {:>9} {:>8}\n", "month", "avg", "median", "listings"));
    for t in trends {
        out.push_str(&format!(
            "{:<10} {:>9} {:>9} {:>8}\n",
            t.month,
            format_currency(t.avg_price),
            format_currency(t.median_price),
            t.listings
        ));
    }

    out
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.min(BAR_WIDTH))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
