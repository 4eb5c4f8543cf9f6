//! Export the listings table to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::CarListing;
use crate::error::AppError;

pub const LISTINGS_CSV_HEADER: &str =
    "id,make,model,year,price,fair_price,price_delta_pct,mileage,condition,deal_rating,listed_date,body_type";

/// Write table rows (already filtered/sorted) to a CSV file.
pub fn write_listings_csv(path: &Path, rows: &[&CarListing]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::runtime(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "{LISTINGS_CSV_HEADER}")
        .map_err(|e| AppError::runtime(format!("Failed to write export CSV header: {e}")))?;

    for l in rows {
        writeln!(
            file,
            "{},{},{},{},{:.2},{:.2},{:.1},{:.0},{},{},{},{}",
            csv_field(&l.id),
            csv_field(&l.make),
            csv_field(&l.model),
            l.year,
            l.price,
            l.fair_price,
            l.price_delta_pct(),
            l.mileage,
            l.condition.display_name(),
            l.deal_rating.display_name(),
            l.listed_date,
            csv_field(&l.body_type),
        )
        .map_err(|e| AppError::runtime(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Quote a field if it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
