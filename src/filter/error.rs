use thiserror::Error;

/// Errors raised while translating filters between the UI, transport and
/// query-string representations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// An operator outside the known table. Inputs produced by this crate
    /// never hit this; it indicates a caller bug.
    #[error("Unmapped operator: '{0}'")]
    Mapping(String),

    /// A well-formed token whose value is not valid for its operator
    #[error("Invalid filter on '{field}': {reason}")]
    InvalidFilter { field: String, reason: String },

    #[error("Unknown filter field: '{0}'")]
    UnknownField(String),
}

impl FilterError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FilterError::InvalidFilter {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
