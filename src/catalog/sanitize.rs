//! Feed-record validation and user input parsing.
//!
//! The estimator trusts its catalog, so every record coming from outside the
//! crate goes through [`sanitize`] first. Rejected rows are counted, not errors:
//! scraped feeds routinely contain listings without a year or mileage.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ListingRecord;
use crate::error::AppError;

/// Mileage as it appears in feed JSON: either a number or scraped text such as
/// `"45,000 miles"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawMileage {
    Number(f64),
    Text(String),
}

impl RawMileage {
    pub fn value(&self) -> Option<f64> {
        match self {
            RawMileage::Number(v) => Some(*v),
            RawMileage::Text(s) => parse_mileage_text(s),
        }
    }
}

/// A listing as produced by the scraper / listings API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub external_id: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub mileage: Option<RawMileage>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub location: String,
}

impl RawListing {
    /// Convert to a validated record, or `None` if any required field is
    /// missing or out of range.
    pub fn to_record(&self) -> Option<ListingRecord> {
        let year = self.year?;
        let mileage = self.mileage.as_ref().and_then(RawMileage::value)?;
        validate_record(ListingRecord::new(&self.make, &self.model, year, self.price, mileage))
    }
}

/// Apply the catalog invariants to an already-typed record.
///
/// Make and model are trimmed; the record is rejected if either is empty,
/// the year is not positive, the price is not a positive finite number or
/// the mileage is negative or non-finite.
pub fn validate_record(record: ListingRecord) -> Option<ListingRecord> {
    let make = record.make.trim();
    let model = record.model.trim();
    if make.is_empty() || model.is_empty() || record.year <= 0 {
        return None;
    }
    if !(record.price.is_finite() && record.price > 0.0) {
        return None;
    }
    if !(record.mileage.is_finite() && record.mileage >= 0.0) {
        return None;
    }
    Some(ListingRecord::new(make, model, record.year, record.price, record.mileage))
}

/// Result of validating a batch of feed listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanitizeReport {
    pub records: Vec<ListingRecord>,
    pub dropped: usize,
}

/// Keep only listings that satisfy the catalog invariants.
pub fn sanitize(raw: &[RawListing]) -> SanitizeReport {
    let mut report = SanitizeReport::default();
    for listing in raw {
        match listing.to_record() {
            Some(record) => report.records.push(record),
            None => {
                debug!(external_id = %listing.external_id, title = %listing.title, "dropping incomplete listing");
                report.dropped += 1;
            }
        }
    }
    report
}

/// Keep only typed records that satisfy the catalog invariants.
pub fn sanitize_records(records: impl IntoIterator<Item = ListingRecord>) -> SanitizeReport {
    let mut report = SanitizeReport::default();
    for record in records {
        match validate_record(record) {
            Some(record) => report.records.push(record),
            None => report.dropped += 1,
        }
    }
    report
}

/// Read the leading number out of scraped mileage text.
///
/// Thousands separators are ignored: `"45,000 miles"` → `45000.0`.
pub fn parse_mileage_text(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    let token: String = cleaned
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if token.is_empty() {
        return None;
    }
    token.parse::<f64>().ok()
}

/// Parse the free-form mileage a user typed before calling the estimator.
///
/// Accepts `15000`, `15,000`, `15000 mi`, `15,000 miles`. Rejects empty,
/// non-numeric, non-finite and negative input.
pub fn parse_mileage_input(input: &str) -> Result<f64, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::input("Mileage is required."));
    }

    let lowered = trimmed.to_ascii_lowercase();
    let number = lowered
        .strip_suffix("miles")
        .or_else(|| lowered.strip_suffix("mi"))
        .unwrap_or(&lowered)
        .trim()
        .replace(',', "");

    let value: f64 = number
        .parse()
        .map_err(|_| AppError::input(format!("Invalid mileage '{trimmed}': expected a number.")))?;

    if !value.is_finite() || value < 0.0 {
        return Err(AppError::input(format!(
            "Invalid mileage '{trimmed}': must be a non-negative number."
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(make: &str, model: &str, year: Option<i32>, price: f64, mileage: Option<RawMileage>) -> RawListing {
        RawListing {
            make: make.to_string(),
            model: model.to_string(),
            year,
            price,
            mileage,
            ..RawListing::default()
        }
    }

    #[test]
    fn sanitize_drops_incomplete_rows() {
        let rows = vec![
            raw("Toyota", "Camry", Some(2022), 28500.0, Some(RawMileage::Number(15000.0))),
            raw("", "Camry", Some(2022), 28500.0, Some(RawMileage::Number(15000.0))),
            raw("Toyota", " ", Some(2022), 28500.0, Some(RawMileage::Number(15000.0))),
            raw("Toyota", "Camry", None, 28500.0, Some(RawMileage::Number(15000.0))),
            raw("Toyota", "Camry", Some(2022), 0.0, Some(RawMileage::Number(15000.0))),
            raw("Toyota", "Camry", Some(2022), 28500.0, None),
            raw("Toyota", "Camry", Some(2022), 28500.0, Some(RawMileage::Number(-1.0))),
            raw("Honda", "Civic", Some(2023), 24500.0, Some(RawMileage::Text("8,000 miles".to_string()))),
        ];

        let report = sanitize(&rows);
        assert_eq!(report.dropped, 6);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[1], ListingRecord::new("Honda", "Civic", 2023, 24500.0, 8000.0));
    }

    #[test]
    fn typed_records_get_the_same_checks() {
        let report = sanitize_records(vec![
            ListingRecord::new(" Toyota ", "Camry", 2022, 28500.0, 15000.0),
            ListingRecord::new("Toyota", "", 2022, 28500.0, 15000.0),
            ListingRecord::new("Toyota", "Camry", 2022, 0.0, 15000.0),
            ListingRecord::new("Toyota", "Camry", 2022, 28500.0, -50000.0),
            ListingRecord::new("Toyota", "Camry", 0, 28500.0, 15000.0),
            ListingRecord::new("Toyota", "Camry", 2022, f64::NAN, 15000.0),
        ]);
        assert_eq!(report.dropped, 5);
        assert_eq!(report.records, vec![ListingRecord::new("Toyota", "Camry", 2022, 28500.0, 15000.0)]);
    }

    #[test]
    fn mileage_text_reads_leading_number() {
        assert_eq!(parse_mileage_text("45,000 miles"), Some(45000.0));
        assert_eq!(parse_mileage_text(" 12000km"), Some(12000.0));
        assert_eq!(parse_mileage_text("unknown"), None);
        assert_eq!(parse_mileage_text(""), None);
    }

    #[test]
    fn mileage_input_accepts_common_spellings() {
        assert_eq!(parse_mileage_input("15000").unwrap(), 15000.0);
        assert_eq!(parse_mileage_input(" 15,000 mi ").unwrap(), 15000.0);
        assert_eq!(parse_mileage_input("15,000 Miles").unwrap(), 15000.0);
        assert_eq!(parse_mileage_input("0").unwrap(), 0.0);
    }

    #[test]
    fn mileage_input_rejects_bad_values() {
        for bad in ["", "   ", "abc", "-5", "NaN", "inf"] {
            let err = parse_mileage_input(bad).unwrap_err();
            assert_eq!(err.exit_code(), 2, "{bad}");
        }
    }

    #[test]
    fn raw_listing_deserializes_text_and_number_mileage() {
        let json = r#"[
            {"make": "Toyota", "model": "Camry", "year": 2022, "price": 28500, "mileage": 15000},
            {"make": "Honda", "model": "Civic", "year": 2023, "price": 24500, "mileage": "8,000 mi"}
        ]"#;
        let rows: Vec<RawListing> = serde_json::from_str(json).unwrap();
        let report = sanitize(&rows);
        assert_eq!(report.dropped, 0);
        assert_eq!(report.records[0].mileage, 15000.0);
        assert_eq!(report.records[1].mileage, 8000.0);
    }
}
