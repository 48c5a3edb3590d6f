use super::error::FilterError;
use super::fields::BOOLEAN_FIELDS;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

/// A token value after conversion to the type its field is indexed as
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    Text(String),
    /// Milliseconds since the Unix epoch
    Millis(i64),
    Bool(bool),
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Text(s) => f.write_str(s),
            TypedValue::Millis(ms) => write!(f, "{ms}"),
            TypedValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

pub fn is_timestamp_field(field_name: &str) -> bool {
    field_name.to_ascii_lowercase().contains("timestamp")
}

/// Convert a raw UI value to the representation the search index stores
pub fn coerce_for_transport(field_name: &str, raw: &str) -> Result<TypedValue, FilterError> {
    if is_timestamp_field(field_name) {
        parse_epoch_millis(raw)
            .map(TypedValue::Millis)
            .ok_or_else(|| FilterError::invalid(field_name, format!("'{raw}' is not a date")))
    } else if BOOLEAN_FIELDS.contains(&field_name) {
        Ok(TypedValue::Bool(raw == "true"))
    } else {
        Ok(TypedValue::Text(raw.to_string()))
    }
}

/// Convert a stored transport value back to what the UI displays.
///
/// Timestamps come back as `YYYY-MM-DD`; the time of day is dropped.
pub fn coerce_for_display(field_name: &str, stored: &str) -> Result<String, FilterError> {
    if !is_timestamp_field(field_name) {
        return Ok(stored.to_string());
    }
    let millis: i64 = stored.trim().parse().map_err(|_| {
        FilterError::invalid(field_name, format!("'{stored}' is not epoch milliseconds"))
    })?;
    let date = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        FilterError::invalid(field_name, format!("{millis} is outside the supported range"))
    })?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Parse an ISO-8601 date or date-time. Inputs without an offset are UTC.
pub fn parse_epoch_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}
