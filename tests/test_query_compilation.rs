use fleet_filter::FilterToken;
use fleet_filter::filter::{
    DomainFilter, DomainFilterSet, DomainOperator, FilterError, FilterOperation,
    FirmwareFilterValue, PropertyFilterQuery, UiOperator, assemble, compile_query,
    from_domain_filter, to_domain_filter, to_domain_filter_set,
};

fn firmware_types() -> Vec<String> {
    vec!["radio".to_string(), "app".to_string()]
}

fn favorites() -> Vec<String> {
    vec!["d1".to_string(), "d2".to_string()]
}

#[test]
fn test_empty_query_matches_all() {
    let query = PropertyFilterQuery::new(FilterOperation::And);
    assert_eq!(compile_query(&query, &favorites(), &firmware_types()).unwrap(), "*");
}

#[test]
fn test_favorites_only_query() {
    let query = PropertyFilterQuery::new(FilterOperation::And)
        .with_token(FilterToken::new("favorite", UiOperator::Eq, "true"));
    assert_eq!(
        compile_query(&query, &favorites(), &firmware_types()).unwrap(),
        "(thingName = (d1 OR d2))"
    );
}

#[test]
fn test_favorite_token_without_favorite_devices_matches_all() {
    let query = PropertyFilterQuery::new(FilterOperation::And)
        .with_token(FilterToken::new("favorite", UiOperator::Eq, "true"));
    assert_eq!(compile_query(&query, &[], &firmware_types()).unwrap(), "*");
}

#[test]
fn test_mixed_predicates_with_and() {
    let query = PropertyFilterQuery::new(FilterOperation::And)
        .with_token(FilterToken::new("attributes.country", UiOperator::Eq, "US"))
        .with_token(FilterToken::new("attributes.brandName", UiOperator::Ne, "Acme"));
    assert_eq!(
        compile_query(&query, &favorites(), &firmware_types()).unwrap(),
        "(attributes.country:US) AND (NOT attributes.brandName:Acme)"
    );
}

#[test]
fn test_favorites_predicate_leads_regardless_of_token_position() {
    let query = PropertyFilterQuery::new(FilterOperation::Or)
        .with_token(FilterToken::new(
            "connectivity.connected",
            UiOperator::Eq,
            "true",
        ))
        .with_token(FilterToken::new("favorite", UiOperator::Eq, "true"))
        .with_token(FilterToken::new(
            "connectivity.timestamp",
            UiOperator::Ge,
            "2024-01-15",
        ));
    assert_eq!(
        compile_query(&query, &favorites(), &firmware_types()).unwrap(),
        "(thingName = (d1 OR d2)) OR (connectivity.connected:true) OR (connectivity.timestamp>=1705276800000)"
    );
}

#[test]
fn test_compilation_is_deterministic() {
    let query = PropertyFilterQuery::new(FilterOperation::Or)
        .with_token(FilterToken::new("favorite", UiOperator::Eq, "true"))
        .with_token(FilterToken::new("thingGroupNames", UiOperator::Ne, "lab"))
        .with_token(FilterToken::new(
            "firmware",
            UiOperator::Lt,
            FirmwareFilterValue::new("app", "3.0.1"),
        ))
        .with_token(FilterToken::free_text("pump"));

    let first = compile_query(&query, &favorites(), &firmware_types()).unwrap();
    let second = compile_query(&query.clone(), &favorites(), &firmware_types()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_firmware_range_filter() {
    let token = FilterToken::new(
        "firmware",
        UiOperator::Ge,
        FirmwareFilterValue::new("radio", "2.1.0"),
    );
    let filter = to_domain_filter(&token, &firmware_types()).unwrap();
    assert_eq!(
        filter.field_name,
        "shadow.name.$package.reported.radio.attributes.versionInt"
    );
    assert_eq!(filter.value.as_text(), Some("20100"));
}

#[test]
fn test_firmware_exact_filter() {
    let token = FilterToken::new(
        "firmware",
        UiOperator::Eq,
        FirmwareFilterValue::new("radio", "2.1.0"),
    );
    let filter = to_domain_filter(&token, &firmware_types()).unwrap();
    assert_eq!(filter.field_name, "shadow.name.$package.reported.radio.version");
    assert_eq!(filter.value.as_text(), Some("2.1.0"));
}

#[test]
fn test_firmware_query_string() {
    let query = PropertyFilterQuery::new(FilterOperation::And).with_token(FilterToken::new(
        "firmware",
        UiOperator::Lt,
        FirmwareFilterValue {
            firmware_type: None,
            firmware_version: Some("1.12.3".to_string()),
        },
    ));
    assert_eq!(
        compile_query(&query, &[], &firmware_types()).unwrap(),
        "(shadow.name.$package.reported.radio.attributes.versionInt<11203)"
    );
}

#[test]
fn test_invalid_between_produces_no_output() {
    let mut set = DomainFilterSet::new(FilterOperation::And);
    set.filters
        .push(DomainFilter::new("attributes.country", DomainOperator::Eq, "US"));
    set.filters.push(DomainFilter::new(
        "connectivity.timestamp",
        DomainOperator::Between,
        "1705276800000",
    ));

    let result = assemble(&set);
    assert!(
        matches!(result, Err(FilterError::InvalidFilter { .. })),
        "a non-pair between value must fail the whole assembly, got {result:?}"
    );
}

#[test]
fn test_valid_between() {
    let mut set = DomainFilterSet::new(FilterOperation::And);
    set.filters.push(DomainFilter::between(
        "connectivity.timestamp",
        "1705276800000",
        "1705363200000",
    ));
    assert_eq!(
        assemble(&set).unwrap(),
        "(connectivity.timestamp : [1705276800000 TO 1705363200000])"
    );
}

#[test]
fn test_unknown_field_is_fatal() {
    let query = PropertyFilterQuery::new(FilterOperation::And)
        .with_token(FilterToken::new("attributes.serial", UiOperator::Eq, "x"));
    assert_eq!(
        to_domain_filter_set(&query, &[], &[]),
        Err(FilterError::UnknownField("attributes.serial".to_string()))
    );
}

#[test]
fn test_domain_filters_round_trip_through_ui_tokens() {
    let filters = [
        DomainFilter::new("thingName", DomainOperator::Eq, "pump-1"),
        DomainFilter::new("thingTypeName", DomainOperator::Ne, "sensor"),
        DomainFilter::new(
            "connectivity.disconnectReason",
            DomainOperator::Eq,
            "SERVER_INITIATED_DISCONNECT",
        ),
        DomainFilter::new("connectivity.connected", DomainOperator::Eq, "true"),
        DomainFilter::new("attributes.hasApplianceFW", DomainOperator::Eq, "false"),
        DomainFilter::new("attributes.brandName", DomainOperator::Ne, "Acme"),
        DomainFilter::new("attributes.country", DomainOperator::Eq, "US"),
        DomainFilter::new("attributes.modelName", DomainOperator::Eq, "X1"),
        DomainFilter::new("thingGroupNames", DomainOperator::Ne, "lab"),
        DomainFilter::new("connectivity.timestamp", DomainOperator::Lt, "1705276800000"),
        DomainFilter::new(
            "attributes.provisioningTimestamp",
            DomainOperator::Le,
            "1705276800000",
        ),
        DomainFilter::new(
            "attributes.productionTimestamp",
            DomainOperator::Gt,
            "1705276800000",
        ),
        DomainFilter::new("", DomainOperator::None, "pump"),
    ];

    for filter in filters {
        let token = from_domain_filter(&filter).unwrap();
        let back = to_domain_filter(&token, &firmware_types()).unwrap();
        assert_eq!(back, filter, "round trip changed {filter:?}");
    }
}

#[test]
fn test_timestamp_round_trip_drops_time_of_day() {
    let filter =
        DomainFilter::new("connectivity.timestamp", DomainOperator::Ge, "1705321800000");
    let token = from_domain_filter(&filter).unwrap();
    let back = to_domain_filter(&token, &[]).unwrap();
    assert_eq!(back.value.as_text(), Some("1705276800000"));
}

#[test]
fn test_ui_query_json_compiles() {
    let query: PropertyFilterQuery = serde_json::from_str(
        r#"{
            "tokens": [
                {"propertyKey": "favorite", "operator": "=", "value": "true"},
                {"propertyKey": "firmware", "operator": ">=",
                 "value": {"firmwareType": "app", "firmwareVersion": "2.1.0"}},
                {"operator": ":", "value": "pump"}
            ],
            "operation": "and"
        }"#,
    )
    .unwrap();

    assert_eq!(
        compile_query(&query, &favorites(), &firmware_types()).unwrap(),
        "(thingName = (d1 OR d2)) AND (shadow.name.$package.reported.app.attributes.versionInt>=20100) AND (pump)"
    );
}
