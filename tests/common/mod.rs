//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use rand::Rng;
use std::sync::Once;
pub use stratavec::{
    json, Collection, CreateOptions, DistanceMetric, JsonValue, Metadata, MetadataValue,
    NewRecord, QueryResult, VectorDb, VectorError,
};

/// Embedding width used by the reference fixture.
pub const ADA_TOKEN_COUNT: usize = 1536;

/// Collection name used by the reference fixture.
pub const COLLECTION_NAME: &str = "vector_index_test";

/// Cosine distance between the "foo" and "bar" embeddings.
pub const FOO_BAR: f64 = 0.0022719614199674387;
/// Cosine distance between the "foo" and "baz" embeddings.
pub const FOO_BAZ: f64 = 0.004691842206844599;
/// Cosine distance between the "baz" and "bar" embeddings.
pub const BAZ_BAR: f64 = 0.0005609046916807969;

static INIT_TRACING: Once = Once::new();

/// Install a test-writer tracing subscriber once per process.
///
/// Honors `RUST_LOG`; silent by default.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Convert text to an embedding of its character codes, zero-padded to 1536.
pub fn text_to_embedding(text: &str) -> Vec<f32> {
    let mut v: Vec<f32> = text
        .chars()
        .take(ADA_TOKEN_COUNT)
        .map(|c| c as u32 as f32)
        .collect();
    v.resize(ADA_TOKEN_COUNT, 0.0);
    v
}

/// Generate a random vector of given dimension
pub fn random_vector(dim: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

// ============================================================================
// Reference fixture
// ============================================================================

/// Three records: foo/bar/baz with page and category metadata.
pub struct Fixture {
    pub ids: Vec<String>,
    pub documents: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
    pub metadatas: Vec<Metadata>,
}

impl Fixture {
    pub fn new() -> Self {
        let metadata = |page: i64, category: &str| {
            let mut m = Metadata::new();
            m.insert("page".to_string(), MetadataValue::Int(page));
            m.insert("category".to_string(), MetadataValue::from(category));
            m
        };
        Fixture {
            ids: vec![
                "f8e7dee2-63b6-42f1-8b60-2d46710c1971".to_string(),
                "8dde1fbc-2522-4ca2-aedf-5dcb2966d1c6".to_string(),
                "e4991349-d00b-485c-a481-f61695f2b5ae".to_string(),
            ],
            documents: vec!["foo".to_string(), "bar".to_string(), "baz".to_string()],
            embeddings: vec![
                text_to_embedding("foo"),
                text_to_embedding("bar"),
                text_to_embedding("baz"),
            ],
            metadatas: vec![
                metadata(1, "P1"),
                metadata(2, "P1"),
                metadata(3, "P2"),
            ],
        }
    }

    /// Insert with the fixture ids and metadata.
    pub fn insert_all(&self, coll: &Collection) -> Vec<String> {
        coll.insert_texts(
            Some(self.ids.clone()),
            self.documents.clone(),
            self.embeddings.clone(),
            Some(self.metadatas.clone()),
        )
        .unwrap()
    }

    /// Insert with generated ids.
    pub fn insert_generated(&self, coll: &Collection) -> Vec<String> {
        coll.insert_texts(
            None,
            self.documents.clone(),
            self.embeddings.clone(),
            Some(self.metadatas.clone()),
        )
        .unwrap()
    }
}

/// A fresh database with the fixture collection created (pre-deleting any old one).
pub fn fixture_collection(db: &VectorDb) -> Collection {
    init_tracing();
    db.create_collection(
        COLLECTION_NAME,
        ADA_TOKEN_COUNT,
        CreateOptions::new().pre_delete(true),
    )
    .unwrap()
}

/// Query "foo" with an optional JSON filter.
pub fn query_foo(coll: &Collection, k: usize, filter: Option<JsonValue>) -> Vec<QueryResult> {
    coll.query(&text_to_embedding("foo"), k, filter.as_ref())
        .unwrap()
}

pub fn documents(results: &[QueryResult]) -> Vec<&str> {
    results.iter().map(|r| r.document.as_str()).collect()
}
