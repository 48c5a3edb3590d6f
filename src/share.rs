//! Filters carried in a shareable device list link.
//!
//! The link holds the UI query as JSON in a single `query` parameter.

use crate::filter::compile::to_domain_filter_set;
use crate::filter::{DomainFilterSet, FilterError, FilterOperation, PropertyFilterQuery};
use std::string::FromUtf8Error;
use thiserror::Error;

pub const QUERY_PARAM: &str = "query";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Query parameter is not valid UTF-8: {0}")]
    Decode(#[source] FromUtf8Error),

    #[error("Query parameter is not a filter query: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Encode the query as `query=<json>`; `None` when there is nothing to share
pub fn to_query_param(query: &PropertyFilterQuery) -> Result<Option<String>, ShareError> {
    if query.is_empty() {
        return Ok(None);
    }
    let json = serde_json::to_string(query)?;
    Ok(Some(format!("{QUERY_PARAM}={}", urlencoding::encode(&json))))
}

/// Read the UI query out of a URL query string (with or without the `?`)
pub fn from_query_param(params: &str) -> Result<Option<PropertyFilterQuery>, ShareError> {
    let params = params.strip_prefix('?').unwrap_or(params);
    let Some(raw) = params
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == QUERY_PARAM)
        .map(|(_, value)| value)
    else {
        return Ok(None);
    };

    let plus_decoded = raw.replace('+', " ");
    let decoded = urlencoding::decode(&plus_decoded).map_err(ShareError::Decode)?;
    let query = serde_json::from_str(&decoded)?;
    Ok(Some(query))
}

/// Build the transport filter straight from a link.
///
/// Without a `query` parameter the result is an empty `and` filter.
pub fn filter_set_from_query_param(
    params: &str,
    favorite_devices: &[String],
    firmware_types: &[String],
) -> Result<DomainFilterSet, ShareError> {
    match from_query_param(params)? {
        Some(query) => Ok(to_domain_filter_set(
            &query,
            favorite_devices,
            firmware_types,
        )?),
        None => Ok(DomainFilterSet::new(FilterOperation::And)),
    }
}
