//! `$and` / `$or` groups, nesting, and their combination with field leaves

use crate::common::*;

fn run(filter: JsonValue) -> Vec<QueryResult> {
    let db = VectorDb::in_memory();
    let fx = Fixture::new();
    let coll = fixture_collection(&db);
    fx.insert_all(&coll);
    query_foo(&coll, 3, Some(filter))
}

fn assert_hits(filter: JsonValue, expected_len: usize, expected_first: Option<f64>) {
    let results = run(filter.clone());
    assert_eq!(results.len(), expected_len, "result count for {}", filter);
    assert_eq!(
        results.first().map(|r| r.distance),
        expected_first,
        "first distance for {}",
        filter
    );
}

#[test]
fn test_single_member_groups() {
    assert_hits(json!({"$and": [{"page": 1}]}), 1, Some(0.0));
    assert_hits(json!({"$or": [{"page": 1}]}), 1, Some(0.0));
}

#[test]
fn test_two_member_groups() {
    assert_hits(
        json!({"$and": [{"page": {"$gt": 1}}, {"category": "P1"}]}),
        1,
        Some(FOO_BAR),
    );
    assert_hits(
        json!({"$or": [{"page": {"$gt": 1}}, {"category": "P1"}]}),
        3,
        Some(0.0),
    );
}

#[test]
fn test_and_with_or_in_same_mapping() {
    assert_hits(
        json!({
            "$and": [{"page": {"$gt": 1}}, {"category": "P1"}],
            "$or": [{"page": {"$gt": 1}}, {"category": "P1"}],
        }),
        1,
        Some(FOO_BAR),
    );
}

#[test]
fn test_field_next_to_and_group() {
    assert_hits(
        json!({"$and": [{"page": {"$gt": 1}}, {"category": "P1"}], "page": 1}),
        0,
        None,
    );
}

#[test]
fn test_field_next_to_or_group_narrows_it() {
    assert_hits(
        json!({"$or": [{"page": {"$gt": 1}}, {"category": "P1"}], "page": 1}),
        1,
        Some(0.0),
    );
}

#[test]
fn test_field_and_both_groups() {
    assert_hits(
        json!({
            "$and": [{"page": {"$gt": 1}}, {"category": "P1"}],
            "page": 2,
            "$or": [{"page": {"$gt": 1}}, {"category": "P1"}],
        }),
        1,
        Some(FOO_BAR),
    );
}

#[test]
fn test_nested_and_inside_and() {
    assert_hits(
        json!({
            "$and": [{
                "$and": [{"page": {"$gt": 1}}, {"page": {"$lt": 3}}],
                "category": "P2",
            }]
        }),
        0,
        None,
    );
    assert_hits(
        json!({
            "$and": [{
                "$and": [{"page": {"$gt": 1}}, {"page": {"$lt": 3}}],
                "$or": [{"page": {"$gt": 2}}, {"category": {"$eq": "P1"}}],
            }]
        }),
        1,
        Some(FOO_BAR),
    );
}

#[test]
fn test_nested_groups_inside_or() {
    assert_hits(
        json!({
            "$or": [
                {
                    "$and": [{"page": {"$gt": 1}}, {"page": {"$lt": 3}}],
                    "category": "P2",
                },
                {"category": "P2"},
            ]
        }),
        1,
        Some(FOO_BAZ),
    );
    assert_hits(
        json!({
            "$or": [
                {
                    "$and": [{"page": {"$gt": 1}}, {"page": {"$lt": 3}}],
                    "$or": [{"page": {"$lt": 3}}, {"category": {"$eq": "P2"}}],
                },
                {"category": "P2"},
            ]
        }),
        2,
        Some(FOO_BAR),
    );
}

#[test]
fn test_bare_operator_inside_group_fails() {
    let db = VectorDb::in_memory();
    let coll = fixture_collection(&db);
    for filter in [
        json!({"$and": [{"$gt": 1}]}),
        json!({"$or": [{"page": 1}, {"$lt": 2}]}),
        json!({"$and": [{"$or": [{"$eq": 1}]}]}),
    ] {
        let err = coll
            .query(&text_to_embedding("foo"), 3, Some(&filter))
            .unwrap_err();
        assert!(
            matches!(err, VectorError::FilterCompile { .. }),
            "{} should fail to compile",
            filter
        );
    }
}

#[test]
fn test_programmatic_filter_matches_json_form() {
    use stratavec::FilterExpr;

    let db = VectorDb::in_memory();
    let fx = Fixture::new();
    let coll = fixture_collection(&db);
    fx.insert_all(&coll);

    let built = FilterExpr::and([
        FilterExpr::eq("page", 1),
        FilterExpr::or([FilterExpr::gt("page", 1), FilterExpr::eq("category", "P1")]),
    ]);
    let from_json = query_foo(
        &coll,
        3,
        Some(json!({"$or": [{"page": {"$gt": 1}}, {"category": "P1"}], "page": 1})),
    );
    let from_expr = coll
        .query_expr(&text_to_embedding("foo"), 3, &built)
        .unwrap();
    assert_eq!(from_json, from_expr);
}
