//! Saved filter presets
//!
//! Presets are stored by the user preferences service as a list of
//! `{name, filters, operation}` objects. This module only converts between
//! that shape and the filter types; reading and writing the list is the
//! caller's business.

use crate::filter::compile::to_domain_filter;
use crate::filter::fields::FAVORITE;
use crate::filter::model::null_as_empty;
use crate::filter::restore::{FAVORITE_ON, tokens_from_filters};
use crate::filter::{
    DomainFilter, DomainFilterSet, DomainOperator, FilterError, FilterOperation,
    PropertyFilterQuery,
};
use serde::{Deserialize, Serialize};

/// A named filter a user saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFilterPreset {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub filters: Vec<DomainFilter>,
    #[serde(default)]
    pub operation: FilterOperation,
}

fn favorite_marker() -> DomainFilter {
    DomainFilter::new(FAVORITE, DomainOperator::Eq, FAVORITE_ON)
}

fn is_favorite_marker(filter: &DomainFilter) -> bool {
    filter.field_name == FAVORITE
}

impl SavedFilterPreset {
    /// Capture the current UI query under `name`
    pub fn from_query(
        name: impl Into<String>,
        query: &PropertyFilterQuery,
        firmware_types: &[String],
    ) -> Result<Self, FilterError> {
        let mut filters = Vec::with_capacity(query.tokens.len());
        for token in &query.tokens {
            if token.field_path() == FAVORITE {
                if !filters.iter().any(is_favorite_marker) {
                    filters.push(favorite_marker());
                }
            } else {
                filters.push(to_domain_filter(token, firmware_types)?);
            }
        }
        Ok(Self {
            name: name.into(),
            filters,
            operation: query.operation,
        })
    }

    /// Capture an already compiled filter set under `name`. A non-empty
    /// favorite device list is stored as the `favorite` marker only; the
    /// devices themselves live in the user's favorites.
    pub fn from_filter_set(name: impl Into<String>, set: &DomainFilterSet) -> Self {
        let mut filters = Vec::with_capacity(set.filters.len() + 1);
        if !set.favorite_devices.is_empty() {
            filters.push(favorite_marker());
        }
        filters.extend(
            set.filters
                .iter()
                .filter(|f| !is_favorite_marker(f))
                .cloned(),
        );
        Self {
            name: name.into(),
            filters,
            operation: set.operation,
        }
    }

    pub fn targets_favorites(&self) -> bool {
        self.filters.iter().any(is_favorite_marker)
    }

    /// UI state for this preset
    pub fn to_query(&self) -> Result<PropertyFilterQuery, FilterError> {
        Ok(PropertyFilterQuery {
            tokens: tokens_from_filters(&self.filters)?,
            operation: self.operation,
        })
    }

    /// Transport filter for this preset, given the user's current favorites
    pub fn to_filter_set(&self, favorite_devices: &[String]) -> DomainFilterSet {
        let mut set = DomainFilterSet::new(self.operation);
        set.filters = self
            .filters
            .iter()
            .filter(|f| !is_favorite_marker(f))
            .cloned()
            .collect();
        if self.targets_favorites() {
            set = set.with_favorite_devices(favorite_devices.iter().cloned());
        }
        set
    }
}

/// A user's saved presets, in the order the store keeps them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetList {
    presets: Vec<SavedFilterPreset>,
}

impl PresetList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a preset, replacing any preset with the same name.
    ///
    /// The saved preset moves to the end of the list; its index is returned
    /// as the new selection.
    pub fn save(&mut self, preset: SavedFilterPreset) -> usize {
        let replaced = self.delete(&preset.name);
        tracing::debug!(name = %preset.name, replaced, "Saving filter preset");
        self.presets.push(preset);
        self.presets.len() - 1
    }

    /// Remove the preset named exactly `name`. Returns whether one existed.
    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.presets.len();
        self.presets.retain(|p| p.name != name);
        before != self.presets.len()
    }

    pub fn get(&self, name: &str) -> Option<&SavedFilterPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.presets.iter().position(|p| p.name == name)
    }

    /// The preset applied when the device list first loads
    pub fn first(&self) -> Option<&SavedFilterPreset> {
        self.presets.first()
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedFilterPreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl From<Vec<SavedFilterPreset>> for PresetList {
    fn from(presets: Vec<SavedFilterPreset>) -> Self {
        Self { presets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterToken, UiOperator};

    fn preset(name: &str, country: &str) -> SavedFilterPreset {
        SavedFilterPreset {
            name: name.to_string(),
            filters: vec![DomainFilter::new(
                "attributes.country",
                DomainOperator::Eq,
                country,
            )],
            operation: FilterOperation::And,
        }
    }

    #[test]
    fn test_save_overwrites_by_name_and_selects_it() {
        let mut list = PresetList::new();
        assert_eq!(list.save(preset("eu", "DE")), 0);
        assert_eq!(list.save(preset("us", "US")), 1);
        assert_eq!(list.save(preset("eu", "FR")), 1);

        assert_eq!(list.names(), vec!["us", "eu"]);
        assert_eq!(list.get("eu"), Some(&preset("eu", "FR")));
    }

    #[test]
    fn test_delete_unknown_name_is_noop() {
        let mut list = PresetList::from(vec![preset("eu", "DE")]);
        assert!(!list.delete("EU"));
        assert_eq!(list.len(), 1);
        assert!(list.delete("eu"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_favorite_token_is_saved_as_marker() {
        let query = PropertyFilterQuery::new(FilterOperation::Or)
            .with_token(FilterToken::new("favorite", UiOperator::Eq, "true"))
            .with_token(FilterToken::new("thingName", UiOperator::Ne, "pump-1"));
        let saved = SavedFilterPreset::from_query("mine", &query, &[]).unwrap();

        assert!(saved.targets_favorites());
        let set = saved.to_filter_set(&["d1".to_string()]);
        assert_eq!(set.favorite_devices, vec!["d1"]);
        assert_eq!(set.filters.len(), 1);
        assert_eq!(saved.to_query().unwrap(), query);
    }

    #[test]
    fn test_from_filter_set_stores_marker_not_devices() {
        let set = DomainFilterSet::new(FilterOperation::And).with_favorite_devices(["d1", "d2"]);
        let saved = SavedFilterPreset::from_filter_set("favs", &set);
        assert_eq!(saved.filters, vec![favorite_marker()]);
    }

    #[test]
    fn test_store_shape() {
        let list: PresetList = serde_json::from_str(
            r#"[{"name":"default","filters":null,"operation":"and"}]"#,
        )
        .unwrap();
        assert_eq!(list.first().map(|p| p.filters.len()), Some(0));
    }
}
