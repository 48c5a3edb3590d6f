use fleet_filter::filter::{
    DomainFilterSet, FilterOperation, FirmwareFilterValue, PropertyFilterQuery, UiOperator,
    assemble, to_domain_filter_set, to_property_filter_query,
};
use fleet_filter::{FilterToken, PresetList, SavedFilterPreset};

fn firmware_types() -> Vec<String> {
    vec!["radio".to_string()]
}

fn sample_query() -> PropertyFilterQuery {
    PropertyFilterQuery::new(FilterOperation::Or)
        .with_token(FilterToken::new("favorite", UiOperator::Eq, "true"))
        .with_token(FilterToken::new("attributes.country", UiOperator::Eq, "US"))
        .with_token(FilterToken::new(
            "connectivity.timestamp",
            UiOperator::Ge,
            "2024-01-15",
        ))
        .with_token(FilterToken::new(
            "firmware",
            UiOperator::Gt,
            FirmwareFilterValue::new("radio", "2.1.0"),
        ))
}

#[test]
fn test_saved_preset_restores_ui_state() {
    let preset = SavedFilterPreset::from_query("us-fleet", &sample_query(), &firmware_types())
        .expect("preset from query");
    let restored = preset.to_query().expect("query from preset");

    assert_eq!(
        restored,
        sample_query(),
        "restoring a preset should rebuild the tokens that were saved"
    );
}

#[test]
fn test_preset_and_live_query_compile_identically() {
    let favorites = vec!["d1".to_string()];
    let preset = SavedFilterPreset::from_query("us-fleet", &sample_query(), &firmware_types())
        .expect("preset from query");

    let live = to_domain_filter_set(&sample_query(), &favorites, &firmware_types()).unwrap();
    let stored = preset.to_filter_set(&favorites);

    assert_eq!(stored, live);
    assert_eq!(assemble(&stored).unwrap(), assemble(&live).unwrap());
}

#[test]
fn test_filter_set_restores_favorite_token_first() {
    let favorites = vec!["d1".to_string(), "d2".to_string()];
    let set = to_domain_filter_set(&sample_query(), &favorites, &firmware_types()).unwrap();

    let query = to_property_filter_query(&set).unwrap();
    assert_eq!(query.tokens[0].field_path(), "favorite");
    assert_eq!(query.tokens[0].value.as_text(), Some("true"));
    assert_eq!(query, sample_query());
}

#[test]
fn test_empty_favorites_do_not_synthesize_token() {
    let set = DomainFilterSet::new(FilterOperation::And);
    let query = to_property_filter_query(&set).unwrap();
    assert!(query.tokens.is_empty());
}

#[test]
fn test_preset_list_lifecycle() {
    let mut list = PresetList::new();
    let us = SavedFilterPreset::from_query("us", &sample_query(), &firmware_types()).unwrap();
    let empty = SavedFilterPreset::from_query(
        "all",
        &PropertyFilterQuery::default(),
        &firmware_types(),
    )
    .unwrap();

    assert_eq!(list.save(us.clone()), 0);
    assert_eq!(list.save(empty), 1);

    let mut replaced = us.clone();
    replaced.operation = FilterOperation::And;
    let selected = list.save(replaced.clone());
    assert_eq!(selected, 1, "an overwritten preset is re-appended and selected");
    assert_eq!(list.names(), vec!["all", "us"]);
    assert_eq!(list.get("us"), Some(&replaced));

    assert!(!list.delete("missing"), "deleting an unknown preset is a no-op");
    assert_eq!(list.len(), 2);
    assert!(list.delete("all"));
    assert_eq!(list.first().map(|p| p.name.as_str()), Some("us"));
}

#[test]
fn test_preset_store_json_shape() {
    let mut list = PresetList::new();
    list.save(SavedFilterPreset::from_query("us", &sample_query(), &firmware_types()).unwrap());

    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "name": "us",
            "filters": [
                {"fieldName": "favorite", "operator": "eq", "value": "true"},
                {"fieldName": "attributes.country", "operator": "eq", "value": "US"},
                {"fieldName": "connectivity.timestamp", "operator": "ge", "value": "1705276800000"},
                {
                    "fieldName": "shadow.name.$package.reported.radio.attributes.versionInt",
                    "operator": "gt",
                    "value": "20100"
                }
            ],
            "operation": "or"
        }])
    );

    let parsed: PresetList = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, list);
}
