//! Firmware version filters
//!
//! The fleet index stores each firmware type twice under the `$package`
//! shadow: the version string as reported (`2.1.0`) and a packed integer
//! (`20100`) used for range comparisons. The packed form is the major
//! version unpadded followed by a two digit minor and a two digit patch.
//! That width is fixed by the documents already indexed; minor or patch
//! components above 99 and majors of 10 or more do not order correctly
//! against shorter values and are a known limitation.

use super::error::FilterError;
use super::fields::{FIRMWARE, Field, firmware_version_int_path, firmware_version_path};
use super::operator::UiOperator;
use semver::Version;
use serde::{Deserialize, Serialize};

/// Wildcard accepted as an exact-match firmware version
pub const ANY_VERSION: &str = "*";

/// Firmware type used when neither the token nor the caller names one
pub const ANY_FIRMWARE_TYPE: &str = "*";

/// Composite UI value of a `firmware` token
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmwareFilterValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
}

impl FirmwareFilterValue {
    pub fn new(firmware_type: impl Into<String>, firmware_version: impl Into<String>) -> Self {
        Self {
            firmware_type: Some(firmware_type.into()),
            firmware_version: Some(firmware_version.into()),
        }
    }
}

/// Strict semantic version parse. A leading `v` or `=` is tolerated.
pub fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('=')
        .unwrap_or(trimmed)
        .trim_start()
        .trim_start_matches('v');
    Version::parse(trimmed).ok()
}

/// Like [`parse_version`] but fills missing minor/patch components with 0
pub fn parse_version_lenient(raw: &str) -> Option<Version> {
    if let Some(version) = parse_version(raw) {
        return Some(version);
    }
    let trimmed = raw.trim().trim_start_matches('v');
    let mut parts = trimmed.split('.');
    let major = parts.next()?.parse::<u64>().ok()?;
    let minor = match parts.next() {
        Some(p) => p.parse::<u64>().ok()?,
        None => 0,
    };
    let patch = match parts.next() {
        Some(p) => p.parse::<u64>().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(Version::new(major, minor, patch))
}

/// Pack a version into the index's sortable integer string
pub fn encode(version: &Version) -> String {
    format!("{}{:02}{:02}", version.major, version.minor, version.patch)
}

/// Best-effort inverse of [`encode`]: the last two digits are the patch, the
/// two before them the minor, and the rest the major.
pub fn decode(packed: &str) -> Option<String> {
    let packed = packed.trim();
    if packed.len() < 5 || !packed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (rest, patch) = packed.split_at(packed.len() - 2);
    let (major, minor) = rest.split_at(rest.len() - 2);
    let version = Version::new(
        major.parse().ok()?,
        minor.parse().ok()?,
        patch.parse().ok()?,
    );
    Some(version.to_string())
}

/// Whether a UI-entered version is acceptable for the operator
pub fn is_valid_version_input(operator: UiOperator, raw: &str) -> bool {
    (operator == UiOperator::Eq && raw == ANY_VERSION) || parse_version(raw).is_some()
}

/// Rewrite a `firmware` token onto the shadow field the index compares.
///
/// Returns the domain field path and the value to send: the version as
/// entered for `=`, the packed integer for `<`, `<=`, `>`, `>=`.
pub fn route(
    operator: UiOperator,
    value: &FirmwareFilterValue,
    firmware_types: &[String],
) -> Result<(String, String), FilterError> {
    let firmware_type = value
        .firmware_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .or_else(|| firmware_types.first().map(String::as_str))
        .unwrap_or(ANY_FIRMWARE_TYPE);
    let version = value
        .firmware_version
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| FilterError::invalid(FIRMWARE, "missing firmware version"))?;

    match operator {
        UiOperator::Eq => {
            if version != ANY_VERSION && parse_version_lenient(version).is_none() {
                return Err(FilterError::invalid(
                    FIRMWARE,
                    format!("'{version}' is not a semantic version"),
                ));
            }
            Ok((firmware_version_path(firmware_type), version.to_string()))
        }
        op if op.is_range() => {
            let parsed = parse_version_lenient(version).ok_or_else(|| {
                FilterError::invalid(FIRMWARE, format!("'{version}' is not a semantic version"))
            })?;
            Ok((firmware_version_int_path(firmware_type), encode(&parsed)))
        }
        op => Err(FilterError::invalid(
            FIRMWARE,
            format!("operator '{op}' is not supported for firmware"),
        )),
    }
}

/// Rebuild the UI value of a firmware token from one of the shadow fields
pub fn restore(field: &Field, stored: &str) -> Option<FirmwareFilterValue> {
    match field {
        Field::FirmwareVersion(firmware_type) => Some(FirmwareFilterValue::new(
            firmware_type.clone(),
            stored.to_string(),
        )),
        Field::FirmwareVersionInt(firmware_type) => Some(FirmwareFilterValue {
            firmware_type: Some(firmware_type.clone()),
            firmware_version: decode(stored),
        }),
        _ => None,
    }
}
