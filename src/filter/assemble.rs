use super::compile::to_domain_filter_set;
use super::error::FilterError;
use super::fields::{Field, THING_NAME};
use super::model::{DomainFilter, DomainFilterSet, FilterValue, PropertyFilterQuery};
use super::operator::DomainOperator;

/// Query string matching every device
pub const MATCH_ALL: &str = "*";

/// Render one filter in the fleet index query dialect
pub fn construct_predicate(filter: &DomainFilter) -> Result<String, FilterError> {
    let field = Field::parse(&filter.field_name)?;
    let name = filter.field_name.as_str();

    match (filter.operator, &filter.value) {
        (DomainOperator::Between, FilterValue::Range(bounds)) if bounds.len() == 2 => Ok(format!(
            "{name} {} [{} TO {}]",
            filter.operator.query_symbol(),
            bounds[0],
            bounds[1]
        )),
        (DomainOperator::Between, _) => Err(FilterError::invalid(
            name,
            "between requires exactly two bounds",
        )),
        (_, FilterValue::Range(_)) => Err(FilterError::invalid(
            name,
            format!("operator '{}' takes a single value", filter.operator),
        )),
        (operator, FilterValue::Text(value)) => {
            let negation = if operator == DomainOperator::Ne {
                "NOT "
            } else {
                ""
            };
            let symbol = if field == Field::FreeText {
                ""
            } else {
                operator.query_symbol()
            };
            let suffix = if operator == DomainOperator::Contains {
                "*"
            } else {
                ""
            };
            Ok(format!("{negation}{name}{symbol}{value}{suffix}"))
        }
    }
}

/// Render the favorite devices as one `thingName` predicate, if there are any
pub fn favorites_predicate(favorite_devices: &[String]) -> Option<String> {
    if favorite_devices.is_empty() {
        return None;
    }
    Some(format!("{THING_NAME} = ({})", favorite_devices.join(" OR ")))
}

/// Render the filter set as one query string.
///
/// The favorite devices predicate comes first, then every filter in order,
/// all joined by the set's combine operator. An empty set matches all.
pub fn assemble(set: &DomainFilterSet) -> Result<String, FilterError> {
    let mut predicates = Vec::with_capacity(set.filters.len() + 1);
    predicates.extend(favorites_predicate(&set.favorite_devices));

    for filter in &set.filters {
        if Field::parse(&filter.field_name)? == Field::Favorite {
            tracing::trace!("Skipping favorite marker in filter list");
            continue;
        }
        predicates.push(construct_predicate(filter)?);
    }

    let query = if predicates.is_empty() {
        MATCH_ALL.to_string()
    } else {
        let separator = format!(") {} (", set.operation.keyword());
        format!("({})", predicates.join(&separator))
    };

    tracing::debug!(query = %query, "Assembled query string");
    Ok(query)
}

/// Compile a UI query straight to the index query string
pub fn compile_query(
    query: &PropertyFilterQuery,
    favorite_devices: &[String],
    firmware_types: &[String],
) -> Result<String, FilterError> {
    let set = to_domain_filter_set(query, favorite_devices, firmware_types)?;
    assemble(&set)
}
