use hyperitem_query::*;

// ── FilterComponent ─────────────────────────────────────────────

#[test]
fn canonical_tokens_round_trip() {
    for raw in [
        "name,eq,alice",
        "name,neq,bob",
        "age,lt,30",
        "age,gt,30",
        "age,leq,30",
        "age,geq,30",
        "tags,in,a,b,c",
        "tags,nin,x",
        "title,like,rust",
        "title,nlike,go",
        "age,bet,18,65",
        "age,nbet,0,17",
    ] {
        let fc = FilterComponent::parse(raw).unwrap();
        assert_eq!(fc.to_string(), raw);
    }
}

#[test]
fn between_yields_two_values() {
    let fc = FilterComponent::parse("age,bet,18,65").unwrap();
    assert_eq!(fc.operator(), &FilterOperator::Between);
    assert_eq!(fc.value(), &FilterValue::Range("18".into(), "65".into()));
    assert_eq!(fc.value_strings(), vec!["18", "65"]);
}

#[test]
fn between_with_one_value_fails() {
    let err = FilterComponent::parse("age,bet,18").unwrap_err();
    assert!(matches!(err, QueryParseError::InvalidRangeArity { found: 1, .. }));
}

#[test]
fn membership_keeps_every_value() {
    let fc = FilterComponent::parse("tags,in,a,b,c").unwrap();
    assert_eq!(fc.operator(), &FilterOperator::In);
    assert_eq!(
        fc.value(),
        &FilterValue::List(vec!["a".into(), "b".into(), "c".into()])
    );
}

#[test]
fn too_few_parts_fails() {
    for raw in ["", "name", "name,eq"] {
        let err = FilterComponent::parse(raw).unwrap_err();
        assert_eq!(err, QueryParseError::InvalidFilterComponent(raw.into()));
    }
}

#[test]
fn unregistered_operator_is_scalar() {
    let fc = FilterComponent::parse("name,contains,bob,extra").unwrap();
    assert_eq!(fc.operator(), &FilterOperator::Other("contains".into()));
    assert_eq!(fc.value(), &FilterValue::Scalar("bob".into()));
    assert_eq!(fc.to_string(), "name,contains,bob");
    assert_eq!(FilterComponent::parse(&fc.to_string()).unwrap(), fc);
}

#[test]
fn unregistered_operator_survives_json() {
    let fc = FilterComponent::parse("name,startswith,al").unwrap();
    let json = serde_json::to_value(&fc).unwrap();
    assert_eq!(json["operator"], "startswith");
    let back: FilterComponent = serde_json::from_value(json).unwrap();
    assert_eq!(back, fc);
}

#[test]
fn scalar_drops_extra_tokens() {
    let fc = FilterComponent::parse("name,like,a,b").unwrap();
    assert_eq!(fc.value_string(), "a");
}

#[test]
fn component_json_shape() {
    let fc = FilterComponent::parse("age,bet,18,65").unwrap();
    let json = serde_json::to_value(&fc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "operator": "bet", "name": "age", "value": ["18", "65"] })
    );

    let back: FilterComponent = serde_json::from_value(json).unwrap();
    assert_eq!(back, fc);
}

#[test]
fn component_json_reshapes_to_operator() {
    let fc: FilterComponent = serde_json::from_value(serde_json::json!({
        "operator": "in", "name": "tags", "value": ["a", "b"]
    }))
    .unwrap();
    assert_eq!(fc.value(), &FilterValue::List(vec!["a".into(), "b".into()]));

    let err = serde_json::from_value::<FilterComponent>(serde_json::json!({
        "operator": "bet", "name": "age", "value": "18"
    }));
    assert!(err.is_err());
}

// ── Filter ──────────────────────────────────────────────────────

#[test]
fn parse_filter_reads_repeated_keys_in_order() {
    let filter = Filter::from_query("filter=a,eq,1&x=y&filter=b,in,2,3").unwrap();
    assert_eq!(filter.len(), 2);
    assert_eq!(filter.tokens(), vec!["a,eq,1", "b,in,2,3"]);
}

#[test]
fn parse_filter_decodes_percent_encoding() {
    let filter = Filter::from_query("?filter=name%2Ceq%2Cjohn%20doe").unwrap();
    assert_eq!(filter.find_one("name").unwrap().value_string(), "john doe");
}

#[test]
fn parse_filter_absent_key_is_empty() {
    let filter = Filter::from_query("sort=a,ASC").unwrap();
    assert!(filter.is_zero());
}

#[test]
fn parse_filter_fails_fast() {
    let err = Filter::from_query("filter=a,eq,1&filter=bad&filter=c,bet,1").unwrap_err();
    assert_eq!(err, QueryParseError::InvalidFilterComponent("bad".into()));
}

#[test]
fn lookup_and_removal_leave_original_untouched() {
    let filter = Filter::from_query("filter=a,eq,1&filter=b,eq,2&filter=a,neq,3").unwrap();
    assert!(filter.has_component("b"));
    assert!(!filter.has_component("c"));
    assert_eq!(filter.find_one("a").unwrap().operator(), &FilterOperator::Equals);

    let without_a = filter.remove_all("a");
    assert_eq!(without_a.tokens(), vec!["b,eq,2"]);
    assert_eq!(filter.len(), 3);

    let only_a = filter.filter(named("a"));
    assert_eq!(only_a.len(), 2);
    let not_a = filter.filter(not(named("a")));
    assert_eq!(not_a, without_a);
}
