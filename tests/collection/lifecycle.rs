//! Collection lifecycle: create, get, list, drop, stale handles

use crate::common::*;
use std::sync::Arc;
use stratavec::{MemoryStore, RecordStore, StratavecConfig};

#[test]
fn test_get_existing_collection() {
    let db = VectorDb::in_memory();
    let fx = Fixture::new();
    let coll = fixture_collection(&db);
    fx.insert_all(&coll);

    let coll2 = db.get_collection(COLLECTION_NAME).unwrap();
    let results = coll2.query(&text_to_embedding("bar"), 3, None).unwrap();
    coll2.drop_collection().unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].document, fx.documents[1]);
    assert_eq!(results[0].distance, 0.0);
    assert_eq!(results[0].id, fx.ids[1]);

    // the first handle saw the drop too
    let err = coll.query(&text_to_embedding("bar"), 3, None).unwrap_err();
    assert!(err.is_not_found());

    // and the name no longer resolves
    let err = db.get_collection(COLLECTION_NAME).unwrap_err();
    assert!(matches!(err, VectorError::CollectionNotFound { name } if name == COLLECTION_NAME));
}

#[test]
fn test_get_after_drop_through_db() {
    let db = VectorDb::in_memory();
    let coll = fixture_collection(&db);
    db.drop_collection(COLLECTION_NAME).unwrap();

    assert!(db.get_collection(COLLECTION_NAME).unwrap_err().is_not_found());
    assert!(coll.count().unwrap_err().is_not_found());
    assert!(db.drop_collection(COLLECTION_NAME).unwrap_err().is_not_found());
}

#[test]
fn test_stale_handle_does_not_reach_recreated_collection() {
    let db = VectorDb::in_memory();
    let fx = Fixture::new();
    let old = fixture_collection(&db);
    fx.insert_all(&old);

    let new = fixture_collection(&db);
    assert_ne!(old.uid(), new.uid());
    assert_eq!(new.count().unwrap(), 0);

    assert!(old.query(&text_to_embedding("foo"), 3, None).unwrap_err().is_not_found());
    assert!(old
        .insert(vec![NewRecord::new("x", text_to_embedding("x"))])
        .unwrap_err()
        .is_not_found());
    assert!(old.get(&fx.ids[0]).unwrap_err().is_not_found());
    assert!(old.info().unwrap_err().is_not_found());
    assert_eq!(new.count().unwrap(), 0);
}

#[test]
fn test_create_without_pre_delete_conflicts() {
    let db = VectorDb::in_memory();
    db.create_collection("docs", 4, CreateOptions::new()).unwrap();
    let err = db
        .create_collection("docs", 4, CreateOptions::new())
        .unwrap_err();
    assert!(matches!(err, VectorError::CollectionAlreadyExists { .. }));
}

#[test]
fn test_list_and_exists() {
    let db = VectorDb::in_memory();
    db.create_collection("b", 2, CreateOptions::new()).unwrap();
    db.create_collection("a", 2, CreateOptions::new()).unwrap();

    assert!(db.collection_exists("a").unwrap());
    assert!(!db.collection_exists("c").unwrap());

    let names: Vec<String> = db
        .list_collections()
        .unwrap()
        .into_iter()
        .map(|info| info.name)
        .collect();
    assert_eq!(names, vec!["a", "b"]);

    db.drop_collection("a").unwrap();
    assert_eq!(db.list_collections().unwrap().len(), 1);
}

#[test]
fn test_collection_info() {
    let db = VectorDb::in_memory();
    let fx = Fixture::new();
    let coll = fixture_collection(&db);
    fx.insert_all(&coll);

    let info = coll.info().unwrap();
    assert_eq!(info.name, COLLECTION_NAME);
    assert_eq!(info.config.dimension, ADA_TOKEN_COUNT);
    assert_eq!(info.config.metric, DistanceMetric::Cosine);
    assert_eq!(info.count, 3);
}

#[test]
fn test_get_collection_with_unusable_name_is_not_found() {
    let db = VectorDb::in_memory();
    for name in ["_absent", "", "has space"] {
        assert!(matches!(
            db.get_collection(name),
            Err(VectorError::CollectionNotFound { .. })
        ));
    }
}

#[test]
fn test_configured_dimension_limit() {
    let config = StratavecConfig::from_toml_str("max_dimension = 8").unwrap();
    let db = VectorDb::with_config(Arc::new(MemoryStore::new()), config).unwrap();
    assert!(db.create_collection("ok", 8, CreateOptions::new()).is_ok());
    assert!(matches!(
        db.create_collection("too_wide", 9, CreateOptions::new()),
        Err(VectorError::InvalidDimension { dimension: 9, max: 8 })
    ));
}

#[test]
fn test_two_dbs_share_a_store() {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
    let writer = VectorDb::new(Arc::clone(&store));
    let reader = VectorDb::new(store);

    let coll = writer
        .create_collection("shared", 2, CreateOptions::new())
        .unwrap();
    coll.insert(vec![NewRecord::new("a", vec![1.0, 0.0]).with_id("a")])
        .unwrap();

    let seen = reader.get_collection("shared").unwrap();
    assert_eq!(seen.count().unwrap(), 1);
    assert_eq!(seen.uid(), coll.uid());
}
