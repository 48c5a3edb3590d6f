use super::firmware::FirmwareFilterValue;
use super::operator::{DomainOperator, FilterOperation, UiOperator};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Value of a UI token, discriminated by shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Text(String),
    /// Pair input from UI controls. No UI operator maps to `between`, so
    /// compiling or validating a token with this value is `InvalidFilter`.
    Range([String; 2]),
    Firmware(FirmwareFilterValue),
}

impl TokenValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(s) => f.write_str(s),
            TokenValue::Range([low, high]) => write!(f, "[{low}, {high}]"),
            TokenValue::Firmware(value) => write!(
                f,
                "{}/{}",
                value.firmware_type.as_deref().unwrap_or("*"),
                value.firmware_version.as_deref().unwrap_or("*")
            ),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Text(value.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Text(value)
    }
}

impl From<FirmwareFilterValue> for TokenValue {
    fn from(value: FirmwareFilterValue) -> Self {
        TokenValue::Firmware(value)
    }
}

/// One property/operator/value triple built in the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterToken {
    /// Field path, absent for free-text tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_key: Option<String>,
    pub operator: UiOperator,
    pub value: TokenValue,
}

impl FilterToken {
    pub fn new(
        property_key: impl Into<String>,
        operator: UiOperator,
        value: impl Into<TokenValue>,
    ) -> Self {
        Self {
            property_key: Some(property_key.into()),
            operator,
            value: value.into(),
        }
    }

    pub fn free_text(value: impl Into<String>) -> Self {
        Self {
            property_key: None,
            operator: UiOperator::Match,
            value: TokenValue::Text(value.into()),
        }
    }

    /// The field path, empty for free text
    pub fn field_path(&self) -> &str {
        self.property_key.as_deref().unwrap_or("")
    }
}

/// The UI filter builder's state: ordered tokens and one combine operator
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropertyFilterQuery {
    #[serde(default)]
    pub tokens: Vec<FilterToken>,
    #[serde(default)]
    pub operation: FilterOperation,
}

impl PropertyFilterQuery {
    pub fn new(operation: FilterOperation) -> Self {
        Self {
            tokens: Vec::new(),
            operation,
        }
    }

    pub fn with_token(mut self, token: FilterToken) -> Self {
        self.tokens.push(token);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Value of a transport filter. UI-built filters always carry `Text`;
/// `Range` only appears with the `between` operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Range(Vec<String>),
}

impl FilterValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            FilterValue::Range(_) => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Range(values) => write!(f, "[{}]", values.join(" TO ")),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

/// Transport shape of one predicate, as sent to the filter resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainFilter {
    pub field_name: String,
    pub operator: DomainOperator,
    pub value: FilterValue,
}

impl DomainFilter {
    pub fn new(
        field_name: impl Into<String>,
        operator: DomainOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn between(field_name: impl Into<String>, low: &str, high: &str) -> Self {
        Self {
            field_name: field_name.into(),
            operator: DomainOperator::Between,
            value: FilterValue::Range(vec![low.to_string(), high.to_string()]),
        }
    }
}

/// Transport filter object: predicates, combine operator and the favorite
/// devices the favorite toggle expands to
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainFilterSet {
    #[serde(default)]
    pub operation: FilterOperation,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub filters: Vec<DomainFilter>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub favorite_devices: Vec<String>,
}

impl DomainFilterSet {
    pub fn new(operation: FilterOperation) -> Self {
        Self {
            operation,
            ..Self::default()
        }
    }

    /// Set the favorite devices, keeping first-seen order and dropping repeats
    pub fn with_favorite_devices<I, S>(mut self, devices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.favorite_devices.clear();
        for device in devices {
            let device = device.into();
            if !self.favorite_devices.contains(&device) {
                self.favorite_devices.push(device);
            }
        }
        self
    }

    pub fn is_match_all(&self) -> bool {
        self.filters.is_empty() && self.favorite_devices.is_empty()
    }
}

pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
