use super::error::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators offered by the UI filter builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UiOperator {
    /// Free-text match
    #[serde(rename = ":")]
    Match,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
}

impl UiOperator {
    pub const ALL: [UiOperator; 7] = [
        UiOperator::Match,
        UiOperator::Lt,
        UiOperator::Le,
        UiOperator::Gt,
        UiOperator::Ge,
        UiOperator::Eq,
        UiOperator::Ne,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            UiOperator::Match => ":",
            UiOperator::Lt => "<",
            UiOperator::Le => "<=",
            UiOperator::Gt => ">",
            UiOperator::Ge => ">=",
            UiOperator::Eq => "=",
            UiOperator::Ne => "!=",
        }
    }

    pub fn to_domain(self) -> DomainOperator {
        match self {
            UiOperator::Match => DomainOperator::None,
            UiOperator::Lt => DomainOperator::Lt,
            UiOperator::Le => DomainOperator::Le,
            UiOperator::Gt => DomainOperator::Gt,
            UiOperator::Ge => DomainOperator::Ge,
            UiOperator::Eq => DomainOperator::Eq,
            UiOperator::Ne => DomainOperator::Ne,
        }
    }

    /// True for the ordering comparisons `<`, `<=`, `>`, `>=`
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            UiOperator::Lt | UiOperator::Le | UiOperator::Gt | UiOperator::Ge
        )
    }
}

impl FromStr for UiOperator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UiOperator::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| FilterError::Mapping(s.to_string()))
    }
}

impl fmt::Display for UiOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Operators understood by the backend filter resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainOperator {
    None,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    Between,
    Contains,
}

impl DomainOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainOperator::None => "none",
            DomainOperator::Lt => "lt",
            DomainOperator::Le => "le",
            DomainOperator::Gt => "gt",
            DomainOperator::Ge => "ge",
            DomainOperator::Eq => "eq",
            DomainOperator::Ne => "ne",
            DomainOperator::Between => "between",
            DomainOperator::Contains => "contains",
        }
    }

    /// Inverse of [`UiOperator::to_domain`]. `between` and `contains` are
    /// only ever produced by the backend and have no UI symbol.
    pub fn to_ui(self) -> Result<UiOperator, FilterError> {
        match self {
            DomainOperator::None => Ok(UiOperator::Match),
            DomainOperator::Lt => Ok(UiOperator::Lt),
            DomainOperator::Le => Ok(UiOperator::Le),
            DomainOperator::Gt => Ok(UiOperator::Gt),
            DomainOperator::Ge => Ok(UiOperator::Ge),
            DomainOperator::Eq => Ok(UiOperator::Eq),
            DomainOperator::Ne => Ok(UiOperator::Ne),
            DomainOperator::Between | DomainOperator::Contains => {
                Err(FilterError::Mapping(self.as_str().to_string()))
            }
        }
    }

    /// Infix used by the search-index query dialect
    pub fn query_symbol(&self) -> &'static str {
        match self {
            DomainOperator::None
            | DomainOperator::Eq
            | DomainOperator::Ne
            | DomainOperator::Between
            | DomainOperator::Contains => ":",
            DomainOperator::Lt => "<",
            DomainOperator::Le => "<=",
            DomainOperator::Gt => ">",
            DomainOperator::Ge => ">=",
        }
    }
}

impl fmt::Display for DomainOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean operator joining every predicate of one filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperation {
    #[default]
    And,
    Or,
}

impl FilterOperation {
    pub fn keyword(&self) -> &'static str {
        match self {
            FilterOperation::And => "AND",
            FilterOperation::Or => "OR",
        }
    }
}

impl FromStr for FilterOperation {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "and" => Ok(FilterOperation::And),
            "or" => Ok(FilterOperation::Or),
            _ => Err(FilterError::Mapping(s.to_string())),
        }
    }
}
