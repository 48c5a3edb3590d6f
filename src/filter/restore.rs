use super::coerce::coerce_for_display;
use super::error::FilterError;
use super::fields::{FAVORITE, FIRMWARE, Field};
use super::firmware;
use super::model::{
    DomainFilter, DomainFilterSet, FilterToken, FilterValue, PropertyFilterQuery, TokenValue,
};
use super::operator::UiOperator;

/// Value of the favorite token the UI shows when favorites are active
pub const FAVORITE_ON: &str = "true";

/// Rebuild the UI token for one transport filter
pub fn from_domain_filter(filter: &DomainFilter) -> Result<FilterToken, FilterError> {
    let field = Field::parse(&filter.field_name)?;
    let operator = filter.operator.to_ui()?;
    let stored = match &filter.value {
        FilterValue::Text(value) => value.as_str(),
        FilterValue::Range(_) => {
            return Err(FilterError::invalid(
                &filter.field_name,
                "range values have no UI representation",
            ));
        }
    };

    let token = match &field {
        Field::FreeText => FilterToken {
            property_key: None,
            operator,
            value: TokenValue::Text(stored.to_string()),
        },
        Field::FirmwareVersion(_) | Field::FirmwareVersionInt(_) => {
            let value = firmware::restore(&field, stored).unwrap_or_default();
            FilterToken::new(FIRMWARE, operator, value)
        }
        _ => FilterToken::new(
            filter.field_name.as_str(),
            operator,
            coerce_for_display(&filter.field_name, stored)?,
        ),
    };
    Ok(token)
}

/// Rebuild UI tokens for a list of stored filters, in order
pub fn tokens_from_filters(filters: &[DomainFilter]) -> Result<Vec<FilterToken>, FilterError> {
    filters.iter().map(from_domain_filter).collect()
}

pub fn favorite_token() -> FilterToken {
    FilterToken::new(FAVORITE, UiOperator::Eq, FAVORITE_ON)
}

/// Rebuild the UI query for a transport filter set.
///
/// A non-empty favorite device list becomes a single leading `favorite`
/// token.
pub fn to_property_filter_query(set: &DomainFilterSet) -> Result<PropertyFilterQuery, FilterError> {
    let mut tokens = Vec::with_capacity(set.filters.len() + 1);
    let mut has_favorite = false;

    if !set.favorite_devices.is_empty() {
        tokens.push(favorite_token());
        has_favorite = true;
    }

    for filter in &set.filters {
        if filter.field_name == FAVORITE {
            if has_favorite {
                continue;
            }
            has_favorite = true;
        }
        tokens.push(from_domain_filter(filter)?);
    }

    Ok(PropertyFilterQuery {
        tokens,
        operation: set.operation,
    })
}
