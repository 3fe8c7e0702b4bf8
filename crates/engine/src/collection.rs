//! Collection handle: insert, delete, query
//!
//! A [`Collection`] is bound to one incarnation of a named collection. Every
//! operation goes through the backing [`RecordStore`], which rejects the
//! handle with `CollectionNotFound` once that incarnation has been dropped.
//!
//! Validation (embedding dimension and finiteness, ids, filters) always runs
//! before the store is touched, so a rejected call has no side effects.

use crate::query::{rank_rows, validate_query};
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use stratavec_core::{
    compile_optional, validate_record_id, CollectionConfig, CollectionInfo, DistanceMetric,
    FilterExpr, Metadata, NewRecord, QueryResult, Record, VectorError, VectorResult,
};
use stratavec_storage::{RecordStore, StorageError, TableInfo};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Handle to a collection
///
/// Cheap to clone; clones share the same incarnation.
#[derive(Clone)]
pub struct Collection {
    table: TableInfo,
    store: Arc<dyn RecordStore>,
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.table.name)
            .field("uid", &self.table.uid)
            .field("config", &self.table.config)
            .finish()
    }
}

impl Collection {
    pub(crate) fn new(table: TableInfo, store: Arc<dyn RecordStore>) -> Self {
        Collection { table, store }
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.table.name
    }

    /// Immutable configuration
    pub fn config(&self) -> CollectionConfig {
        self.table.config
    }

    /// Embedding dimension
    pub fn dimension(&self) -> usize {
        self.table.config.dimension
    }

    /// Distance metric
    pub fn metric(&self) -> DistanceMetric {
        self.table.config.metric
    }

    /// Incarnation id assigned at creation
    pub fn uid(&self) -> Uuid {
        self.table.uid
    }

    // ========================================================================
    // Insert
    // ========================================================================

    /// Insert a batch of records
    ///
    /// Records without an id get a fresh UUIDv4. Returns the ids in input
    /// order.
    ///
    /// # Errors
    /// - [`VectorError::DimensionMismatch`] / [`VectorError::InvalidEmbedding`]
    ///   for a bad embedding
    /// - [`VectorError::InvalidKey`] for a malformed id
    /// - [`VectorError::DuplicateKey`] if any id exists or repeats in the
    ///   batch; nothing is inserted
    /// - [`VectorError::CollectionNotFound`] if the collection was dropped
    pub fn insert(&self, records: Vec<NewRecord>) -> VectorResult<Vec<String>> {
        let config = self.table.config;
        let mut rows = Vec::with_capacity(records.len());
        for mut record in records {
            config.check_embedding(&record.embedding)?;
            let id = match record.id.take() {
                Some(id) => {
                    validate_record_id(&id)?;
                    id
                }
                None => Uuid::new_v4().to_string(),
            };
            rows.push(record.into_record(id));
        }

        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let count = ids.len();

        self.store
            .insert_rows(&self.table, rows)
            .map_err(|e| {
                if let StorageError::DuplicateKey { id } = &e {
                    warn!(target: "stratavec::collection", collection = %self.table.name, id = %id, count, "Insert batch rejected");
                }
                VectorError::from(e)
            })?;

        debug!(target: "stratavec::collection", collection = %self.table.name, count, "Records inserted");
        Ok(ids)
    }

    /// Insert column-oriented input
    ///
    /// `texts` and `embeddings` are required and must have equal length;
    /// `ids` and `metadatas`, when given, must match that length too.
    ///
    /// # Errors
    /// [`VectorError::InvalidInput`] on a column length mismatch, then
    /// anything [`Collection::insert`] returns.
    pub fn insert_texts(
        &self,
        ids: Option<Vec<String>>,
        texts: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        metadatas: Option<Vec<Metadata>>,
    ) -> VectorResult<Vec<String>> {
        let n = texts.len();
        check_column("embeddings", embeddings.len(), n)?;
        if let Some(ids) = &ids {
            check_column("ids", ids.len(), n)?;
        }
        if let Some(metadatas) = &metadatas {
            check_column("metadatas", metadatas.len(), n)?;
        }

        let mut ids = ids.map(Vec::into_iter);
        let mut metadatas = metadatas.map(Vec::into_iter);
        let records = texts
            .into_iter()
            .zip(embeddings)
            .map(|(text, embedding)| NewRecord {
                id: ids.as_mut().and_then(Iterator::next),
                document: text,
                embedding,
                metadata: metadatas
                    .as_mut()
                    .and_then(Iterator::next)
                    .unwrap_or_default(),
            })
            .collect();

        self.insert(records)
    }

    // ========================================================================
    // Delete
    // ========================================================================

    /// Delete records by id list and/or JSON filter
    ///
    /// A record is removed iff its id is in `ids` (when given) and it
    /// matches `filter` (when given). With neither argument nothing is
    /// removed. Returns the number of records removed.
    ///
    /// An empty filter (`{}`) matches every record, so
    /// `delete(None, Some(&json!({})))` empties the collection.
    ///
    /// # Errors
    /// [`VectorError::FilterCompile`] for a malformed filter, or
    /// [`VectorError::CollectionNotFound`] if the collection was dropped.
    pub fn delete(&self, ids: Option<&[String]>, filter: Option<&JsonValue>) -> VectorResult<usize> {
        if ids.is_none() && filter.is_none() {
            self.ensure_live()?;
            return Ok(0);
        }
        let filter = compile_optional(filter)?;
        self.delete_expr(ids, &filter)
    }

    /// Delete records by id list and a compiled filter
    ///
    /// Unlike [`Collection::delete`], `ids == None` with an always-true
    /// filter removes every record.
    pub fn delete_expr(&self, ids: Option<&[String]>, filter: &FilterExpr) -> VectorResult<usize> {
        let removed = self
            .store
            .delete_rows(&self.table, ids, &|record: &Record| filter.matches(&record.metadata))?;
        debug!(target: "stratavec::collection", collection = %self.table.name, removed, "Records deleted");
        Ok(removed)
    }

    // ========================================================================
    // Query
    // ========================================================================

    /// Top-`k` nearest records matching a JSON filter
    ///
    /// Results are in ascending distance; ties go to the earlier insert.
    /// Fewer than `k` results come back when fewer records match.
    ///
    /// # Errors
    /// - [`VectorError::FilterCompile`] for a malformed filter
    /// - [`VectorError::DimensionMismatch`] / [`VectorError::InvalidEmbedding`]
    ///   for a bad target
    /// - [`VectorError::CollectionNotFound`] if the collection was dropped
    pub fn query(
        &self,
        target: &[f32],
        k: usize,
        filter: Option<&JsonValue>,
    ) -> VectorResult<Vec<QueryResult>> {
        let filter = compile_optional(filter)?;
        self.query_expr(target, k, &filter)
    }

    /// Top-`k` nearest records matching a compiled filter
    pub fn query_expr(
        &self,
        target: &[f32],
        k: usize,
        filter: &FilterExpr,
    ) -> VectorResult<Vec<QueryResult>> {
        let start = Instant::now();
        validate_query(&self.table.config, target)?;

        let rows = self.store.scan(&self.table)?;
        let results = rank_rows(&rows, target, k, filter, self.table.config.metric);

        debug!(
            target: "stratavec::collection",
            collection = %self.table.name,
            k,
            scanned = rows.len(),
            results = results.len(),
            duration_us = start.elapsed().as_micros() as u64,
            "Query completed"
        );
        Ok(results)
    }

    // ========================================================================
    // Read accessors
    // ========================================================================

    /// Number of records
    pub fn count(&self) -> VectorResult<usize> {
        Ok(self.store.row_count(&self.table)?)
    }

    /// Fetch a record by id
    pub fn get(&self, id: &str) -> VectorResult<Option<Record>> {
        Ok(self
            .store
            .get_row(&self.table, id)?
            .map(|row| row.record.clone()))
    }

    /// Name, config, record count and creation time
    pub fn info(&self) -> VectorResult<CollectionInfo> {
        Ok(CollectionInfo {
            name: self.table.name.clone(),
            config: self.table.config,
            count: self.count()?,
            created_at: self.table.created_at,
        })
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Drop this collection and all its records
    ///
    /// Only the incarnation this handle is bound to is dropped.
    pub fn drop_collection(self) -> VectorResult<()> {
        self.store.drop_table(&self.table)?;
        info!(target: "stratavec::db", collection = %self.table.name, uid = %self.table.uid, "Collection dropped");
        Ok(())
    }

    fn ensure_live(&self) -> VectorResult<()> {
        self.store.row_count(&self.table)?;
        Ok(())
    }
}

fn check_column(name: &str, len: usize, expected: usize) -> VectorResult<()> {
    if len != expected {
        return Err(VectorError::invalid_input(format!(
            "{} has {} entries, expected {} (one per text)",
            name, len, expected
        )));
    }
    Ok(())
}
