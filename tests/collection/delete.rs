//! Delete by ids, by filter, and by both

use crate::common::*;

#[test]
fn test_delete_sequence() {
    let db = VectorDb::in_memory();
    let fx = Fixture::new();
    let coll = fixture_collection(&db);
    let ids = fx.insert_all(&coll);

    let results = query_foo(&coll, 3, None);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].document, fx.documents[0]);
    assert_eq!(results[0].distance, 0.0);
    assert_eq!(results[0].id, fx.ids[0]);

    // ids given but the filter excludes both: nothing removed
    let targets = vec![ids[1].clone(), ids[0].clone()];
    let removed = coll
        .delete(Some(&targets), Some(&json!({"category": "P2"})))
        .unwrap();
    assert_eq!(removed, 0);
    let results = query_foo(&coll, 4, None);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].document, fx.documents[0]);
    assert_eq!(results[0].distance, 0.0);
    assert_eq!(results[0].id, ids[0]);

    // ids only
    assert_eq!(coll.delete(Some(&targets), None).unwrap(), 2);
    let results = query_foo(&coll, 4, None);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document, fx.documents[2]);
    assert_eq!(results[0].distance, FOO_BAZ);
    assert_eq!(results[0].id, fx.ids[2]);

    // insert the documents back with new ids
    let ids = fx.insert_generated(&coll);
    let results = query_foo(&coll, 5, None);
    assert_eq!(results.len(), 4);
    assert_eq!(results[0].document, fx.documents[0]);
    assert_eq!(results[0].distance, 0.0);
    assert_eq!(results[0].id, ids[0]);

    // ids and filter together
    let targets = vec![ids[1].clone(), ids[0].clone()];
    assert_eq!(coll.delete(Some(&targets), Some(&json!({"page": 1}))).unwrap(), 1);
    let results = query_foo(&coll, 5, None);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].document, fx.documents[1]);
    assert_eq!(results[1].document, fx.documents[2]);
    assert_eq!(results[1].distance, results[2].distance);

    // insert again, then delete by filter only
    let ids = fx.insert_generated(&coll);
    let results = query_foo(&coll, 10, None);
    assert_eq!(results.len(), 6);
    assert_eq!(results[0].document, fx.documents[0]);
    assert_eq!(results[0].distance, 0.0);
    assert_eq!(results[0].id, ids[0]);

    assert_eq!(coll.delete(None, Some(&json!({"category": "P1"}))).unwrap(), 3);
    let only_baz = |results: &[QueryResult]| {
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.document == "baz"));
        assert_eq!(results[0].distance, results[1].distance);
        assert_eq!(results[1].distance, results[2].distance);
    };
    only_baz(&query_foo(&coll, 10, None));

    // deleting what is already gone is not an error
    assert_eq!(coll.delete(None, Some(&json!({"category": "P1"}))).unwrap(), 0);
    only_baz(&query_foo(&coll, 10, None));

    let targets = vec![ids[1].clone(), ids[0].clone()];
    assert_eq!(coll.delete(Some(&targets), None).unwrap(), 0);
    only_baz(&query_foo(&coll, 10, None));

    assert_eq!(
        coll.delete(Some(&targets), Some(&json!({"category": "P1"})))
            .unwrap(),
        0
    );
    only_baz(&query_foo(&coll, 10, None));

    coll.drop_collection().unwrap();
}

#[test]
fn test_delete_without_arguments_removes_nothing() {
    let db = VectorDb::in_memory();
    let fx = Fixture::new();
    let coll = fixture_collection(&db);
    fx.insert_all(&coll);

    assert_eq!(coll.delete(None, None).unwrap(), 0);
    assert_eq!(coll.count().unwrap(), 3);
}

#[test]
fn test_delete_with_empty_filter_removes_everything() {
    let db = VectorDb::in_memory();
    let fx = Fixture::new();
    let coll = fixture_collection(&db);
    fx.insert_all(&coll);

    assert_eq!(coll.delete(None, Some(&json!({}))).unwrap(), 3);
    assert_eq!(coll.count().unwrap(), 0);
    assert!(query_foo(&coll, 3, None).is_empty());
}

#[test]
fn test_delete_never_touches_ids_outside_list() {
    let db = VectorDb::in_memory();
    let fx = Fixture::new();
    let coll = fixture_collection(&db);
    fx.insert_all(&coll);

    // Filter matches every record, but only one id is listed.
    let targets = vec![fx.ids[2].clone()];
    let removed = coll
        .delete(Some(&targets), Some(&json!({"page": {"$gte": 1}})))
        .unwrap();
    assert_eq!(removed, 1);
    assert!(coll.get(&fx.ids[0]).unwrap().is_some());
    assert!(coll.get(&fx.ids[1]).unwrap().is_some());
    assert!(coll.get(&fx.ids[2]).unwrap().is_none());
}

#[test]
fn test_delete_with_invalid_filter_is_rejected() {
    let db = VectorDb::in_memory();
    let fx = Fixture::new();
    let coll = fixture_collection(&db);
    fx.insert_all(&coll);

    let err = coll
        .delete(None, Some(&json!({"page": {"$regex": "1"}})))
        .unwrap_err();
    assert!(matches!(err, VectorError::FilterCompile { .. }));
    assert_eq!(coll.count().unwrap(), 3);
}

#[test]
fn test_delete_unknown_ids_is_not_error() {
    let db = VectorDb::in_memory();
    let fx = Fixture::new();
    let coll = fixture_collection(&db);
    fx.insert_all(&coll);

    let targets = vec!["missing-1".to_string(), "missing-2".to_string()];
    assert_eq!(coll.delete(Some(&targets), None).unwrap(), 0);
    assert_eq!(coll.count().unwrap(), 3);
}
