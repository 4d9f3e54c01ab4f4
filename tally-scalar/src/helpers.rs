//! Common field utilities

use chrono::NaiveDate;
use tally_core::TallyError;
use tally_plugin::Fields;

/// Calendar format of every date field
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, TallyError> {
    NaiveDate::parse_from_str(input.trim(), ISO_DATE).map_err(|_| TallyError::date_format(input))
}

/// Extract a date field
pub fn extract_date(fields: &Fields, name: &str) -> Result<NaiveDate, TallyError> {
    let raw = fields.require(name)?;
    parse_iso_date(raw).map_err(|e| e.in_field(name))
}

/// Extract a dropdown field, resolving it against the allowed options
pub fn extract_choice<T: Copy>(fields: &Fields, name: &str, options: &[(&str, T)]) -> Result<T, TallyError> {
    let raw = fields.require(name)?;
    options.iter()
        .find(|(label, _)| *label == raw)
        .map(|(_, value)| *value)
        .ok_or_else(|| {
            let labels: Vec<&str> = options.iter().map(|(label, _)| *label).collect();
            TallyError::invalid_input(format!("'{}' is not an option", raw))
                .in_field(name)
                .with_input(raw)
                .with_suggestion(format!("Choose one of: {}", labels.join(", ")))
        })
}

/// Validate that a value is strictly positive
pub fn require_positive(value: f64, name: &str) -> Result<f64, TallyError> {
    if value <= 0.0 {
        return Err(TallyError::invalid_input(format!("{} must be positive, got {}", name, value))
            .in_field(name));
    }
    Ok(value)
}

/// Validate that a value is not negative
pub fn require_non_negative(value: f64, name: &str) -> Result<f64, TallyError> {
    if value < 0.0 {
        return Err(TallyError::invalid_input(format!("{} cannot be negative, got {}", name, value))
            .in_field(name));
    }
    Ok(value)
}
