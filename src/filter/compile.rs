use super::coerce::coerce_for_transport;
use super::error::FilterError;
use super::fields::{FAVORITE, Field};
use super::firmware;
use super::model::{DomainFilter, DomainFilterSet, FilterToken, PropertyFilterQuery, TokenValue};

/// Convert one UI token into its transport filter.
///
/// `favorite` tokens are not predicates and are rejected here; use
/// [`to_domain_filter_set`], which lifts them into the favorite devices.
pub fn to_domain_filter(
    token: &FilterToken,
    firmware_types: &[String],
) -> Result<DomainFilter, FilterError> {
    let path = token.field_path();
    let field = Field::parse(path)?;

    match (&field, &token.value) {
        (Field::Favorite, _) => Err(FilterError::invalid(
            FAVORITE,
            "favorite is applied through the favorite device list",
        )),
        (Field::Firmware, TokenValue::Firmware(value)) => {
            let (field_name, value) = firmware::route(token.operator, value, firmware_types)?;
            Ok(DomainFilter::new(field_name, token.operator.to_domain(), value))
        }
        (Field::Firmware, _) => Err(FilterError::invalid(
            path,
            "expected a firmware type and version",
        )),
        (_, TokenValue::Text(raw)) => {
            let typed = coerce_for_transport(path, raw)?;
            Ok(DomainFilter::new(
                path,
                token.operator.to_domain(),
                typed.to_string(),
            ))
        }
        (_, _) => Err(FilterError::invalid(path, "expected a single text value")),
    }
}

/// Convert the UI query into the transport filter set.
///
/// A `favorite` token turns the favorite filter on: the caller's favorite
/// devices are carried in `favorite_devices` and no predicate is emitted
/// for the token itself. Without one, `favorite_devices` stays empty.
pub fn to_domain_filter_set(
    query: &PropertyFilterQuery,
    favorite_devices: &[String],
    firmware_types: &[String],
) -> Result<DomainFilterSet, FilterError> {
    let mut filtered_to_favorites = false;
    let mut filters = Vec::with_capacity(query.tokens.len());

    for token in &query.tokens {
        if token.field_path() == FAVORITE {
            filtered_to_favorites = true;
            continue;
        }
        filters.push(to_domain_filter(token, firmware_types)?);
    }

    let mut set = DomainFilterSet::new(query.operation);
    set.filters = filters;
    if filtered_to_favorites {
        set = set.with_favorite_devices(favorite_devices.iter().cloned());
    }

    tracing::debug!(
        filters = set.filters.len(),
        favorites = set.favorite_devices.len(),
        operation = ?set.operation,
        "Compiled filter query"
    );
    Ok(set)
}
