//! Device filter translation
//!
//! This module converts device inventory filters between three shapes:
//! the UI filter builder's tokens ([`PropertyFilterQuery`]), the transport
//! object sent to the filter resolver ([`DomainFilterSet`]), and the
//! query string understood by the fleet index.
//!
//! # Query dialect
//!
//! ```text
//! field:value              equality (`=`)
//! NOT field:value          inequality (`!=`)
//! field<value              ordering, also <=, >, >=
//! field:value*             prefix match (`contains`)
//! field : [low TO high]    range (`between`)
//! value                    free text
//! ```
//!
//! Predicates are wrapped in parentheses and joined with the query's single
//! combine operator:
//!
//! ```text
//! (thingName = (d1 OR d2)) AND (attributes.country:US) AND (NOT attributes.brandName:Acme)
//! ```
//!
//! An empty filter renders as `*`.
//!
//! # Special fields
//!
//! - `favorite` never becomes a predicate. It switches on the favorite
//!   devices list, rendered as the leading `thingName = (...)` group.
//! - `firmware` carries a firmware type and version and is rewritten onto the
//!   `$package` shadow: the version string for `=`, the packed integer
//!   (see [`firmware::encode`]) for range operators.

pub mod assemble;
pub mod coerce;
pub mod compile;
pub mod error;
pub mod fields;
pub mod firmware;
pub mod model;
pub mod operator;
pub mod restore;
pub mod validate;

pub use assemble::{
    MATCH_ALL, assemble, compile_query, construct_predicate, favorites_predicate,
};
pub use coerce::{TypedValue, coerce_for_display, coerce_for_transport};
pub use compile::{to_domain_filter, to_domain_filter_set};
pub use error::FilterError;
pub use fields::Field;
pub use firmware::FirmwareFilterValue;
pub use model::{
    DomainFilter, DomainFilterSet, FilterToken, FilterValue, PropertyFilterQuery, TokenValue,
};
pub use operator::{DomainOperator, FilterOperation, UiOperator};
pub use restore::{from_domain_filter, to_property_filter_query};
pub use validate::{validate_query, validate_token};
