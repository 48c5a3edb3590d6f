use super::coerce::parse_epoch_millis;
use super::error::FilterError;
use super::fields::Field;
use super::firmware::is_valid_version_input;
use super::model::{FilterToken, PropertyFilterQuery, TokenValue};
use super::restore::FAVORITE_ON;

/// Check a token the way the filter builder's forms do before it is
/// submitted: the field and operator must be offered together, and the
/// value must be well formed for the field.
pub fn validate_token(token: &FilterToken) -> Result<(), FilterError> {
    let path = token.field_path();
    let field = Field::parse(path)?;

    if !field.supports(token.operator) {
        return Err(FilterError::invalid(
            path,
            format!("operator '{}' is not offered for this field", token.operator),
        ));
    }

    match (&field, &token.value) {
        (Field::Firmware, TokenValue::Firmware(value)) => {
            let version = value.firmware_version.as_deref().unwrap_or("");
            if !is_valid_version_input(token.operator, version) {
                return Err(FilterError::invalid(
                    path,
                    format!("'{version}' is not a valid firmware version"),
                ));
            }
            Ok(())
        }
        (Field::Firmware, _) => Err(FilterError::invalid(
            path,
            "expected a firmware type and version",
        )),
        (_, TokenValue::Text(raw)) if raw.trim().is_empty() => {
            Err(FilterError::invalid(path, "empty value"))
        }
        (Field::Favorite, TokenValue::Text(raw)) if raw != FAVORITE_ON => {
            Err(FilterError::invalid(path, format!("expected '{FAVORITE_ON}'")))
        }
        (Field::Boolean(_), TokenValue::Text(raw)) if raw != "true" && raw != "false" => Err(
            FilterError::invalid(path, format!("'{raw}' is not true or false")),
        ),
        (Field::Timestamp(_), TokenValue::Text(raw)) if parse_epoch_millis(raw).is_none() => {
            Err(FilterError::invalid(path, format!("'{raw}' is not a date")))
        }
        (_, TokenValue::Text(_)) => Ok(()),
        (_, _) => Err(FilterError::invalid(path, "expected a single text value")),
    }
}

/// Validate every token, stopping at the first failure
pub fn validate_query(query: &PropertyFilterQuery) -> Result<(), FilterError> {
    query.tokens.iter().try_for_each(validate_token)
}
