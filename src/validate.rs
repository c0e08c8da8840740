//! Field validation helpers, applied by the repository before any write.

use chrono::NaiveDate;

use crate::error::{Result, TruckCareError};
use crate::model::VehicleClass;

/// Trim a required text field, rejecting it when empty after the trim.
pub fn required_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TruckCareError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Mileage counters never run backwards past zero.
pub fn non_negative_mileage(mileage: i64) -> Result<i64> {
    if mileage < 0 {
        return Err(TruckCareError::Validation(format!(
            "mileage must not be negative (got {mileage})"
        )));
    }
    Ok(mileage)
}

/// Parse operator-entered mileage text. Empty, non-numeric and negative
/// inputs are each rejected as validation failures.
pub fn parse_mileage(value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TruckCareError::Validation(
            "mileage must not be empty".to_string(),
        ));
    }
    let mileage: i64 = trimmed
        .parse()
        .map_err(|_| TruckCareError::Validation(format!("mileage must be an integer (got '{trimmed}')")))?;
    non_negative_mileage(mileage)
}

/// Validate a calendar date in ISO 8601 form (`YYYY-MM-DD`) and return
/// its canonical text. `2025-02-30` fails, not just malformed strings.
pub fn iso_date(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        TruckCareError::Validation(format!("{field} must be an ISO date (YYYY-MM-DD), got '{trimmed}'"))
    })?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// A position is only meaningful within its vehicle class's closed set.
pub fn position_in_class(class: VehicleClass, position: &str) -> Result<String> {
    if !class.valid_position(position) {
        return Err(TruckCareError::Validation(format!(
            "position '{position}' is not valid for a {class}"
        )));
    }
    Ok(position.to_string())
}
