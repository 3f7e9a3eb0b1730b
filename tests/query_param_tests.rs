use pagecrate::{
    FilterOperator, ListParams, ListQuery, ParseError, SortDirection, parse_filter, parse_sort,
};

// ===== SORT PARAMETER =====

#[test]
fn test_sort_precedence_matches_input_order() {
    let criteria = parse_sort("country,city:desc,name").unwrap();
    let properties: Vec<&str> = criteria.iter().map(|c| c.property.as_str()).collect();
    assert_eq!(properties, vec!["country", "city", "name"]);
    assert_eq!(criteria[0].direction, SortDirection::Ascending);
    assert_eq!(criteria[1].direction, SortDirection::Descending);
    assert_eq!(criteria[2].direction, SortDirection::Ascending);
}

#[test]
fn test_sort_url_decoded_spaces_are_tolerated() {
    // "sort=name, age : desc" after URL decoding
    let criteria = parse_sort("name, age : desc").unwrap();
    assert_eq!(criteria[1].property, "age");
    assert_eq!(criteria[1].direction, SortDirection::Descending);
}

// ===== FILTER PARAMETER =====

#[test]
fn test_filter_conjunction_list() {
    let criteria = parse_filter("age gte 25,age lt 65,name like Jo").unwrap();
    assert_eq!(criteria.len(), 3);
    assert_eq!(criteria[0].operator, FilterOperator::GreaterOrEqual);
    assert_eq!(criteria[1].operator, FilterOperator::LessThan);
    assert_eq!(criteria[2].operator, FilterOperator::Like);
    // The same property may appear in several criteria; consumers AND them
    assert_eq!(criteria[0].property, criteria[1].property);
}

#[test]
fn test_filter_values_stay_textual() {
    // The parser types the operator, never the value
    let criteria = parse_filter("created_at gte 2024-01-01").unwrap();
    assert_eq!(criteria[0].values, vec!["2024-01-01"]);
}

#[test]
fn test_filter_nested_path_with_in_list() {
    let criteria = parse_filter("address.country in FR|BE|CH").unwrap();
    assert_eq!(criteria[0].property, "address.country");
    let segments: Vec<&str> = criteria[0].path_segments().collect();
    assert_eq!(segments, vec!["address", "country"]);
    assert_eq!(criteria[0].values, vec!["FR", "BE", "CH"]);
}

// ===== COMBINED REQUEST =====

#[test]
fn test_list_query_from_query_string_params() {
    let params: ListParams = serde_json::from_str(
        r#"{"sort":"code:asc","filter":"region eq Europe,population gte 1000000"}"#,
    )
    .unwrap();
    let query = ListQuery::parse(Some("countries=0-19"), &params).unwrap();

    let range = query.range.expect("Range header was present");
    assert_eq!(range.element_name(), "countries");
    assert_eq!(range.size(), 20);

    assert_eq!(query.sort.len(), 1);
    assert_eq!(query.sort[0].property, "code");

    assert_eq!(query.filters.len(), 2);
    assert_eq!(query.filters[1].values, vec!["1000000"]);
}

#[test]
fn test_list_query_rejects_first_malformed_part() {
    let params = ListParams {
        sort: Some("code:asc".to_owned()),
        filter: Some("region eq".to_owned()),
    };
    let err = ListQuery::parse(Some("countries=0-19"), &params).unwrap_err();
    assert!(matches!(err, ParseError::MalformedFilter { .. }));
}

#[test]
fn test_operator_mnemonics_round_trip() {
    for mnemonic in ["eq", "ne", "gt", "gte", "lt", "lte", "like", "in"] {
        let operator = FilterOperator::from_mnemonic(mnemonic).unwrap();
        assert_eq!(operator.mnemonic(), mnemonic);
    }
}
