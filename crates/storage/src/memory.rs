//! In-memory record store
//!
//! # Design
//!
//! - Table registry: `DashMap<String, Arc<Table>>` keyed by name
//! - Each table: rows in a `BTreeMap<u64, Arc<StoredRow>>` keyed by insertion
//!   sequence, plus an `FxHashMap` id index, both behind one `parking_lot::RwLock`
//! - Inserts and deletes hold the table write lock for their whole duration,
//!   so each batch is applied atomically
//! - Scans hold the read lock only long enough to clone the row `Arc`s
//!
//! # Incarnations
//!
//! Dropping a table removes it from the registry and marks it `dropped`
//! under its write lock. Row operations resolve the table by name and then
//! compare the caller's `uid`, so a handle to a dropped table never reaches
//! a table recreated under the same name.

use crate::error::{StorageError, StorageResult};
use crate::traits::{RecordStore, StoredRow, TableInfo};
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::sync::Arc;
use stratavec_core::{CollectionConfig, Record};
use tracing::debug;
use uuid::Uuid;

/// Rows of one table
#[derive(Debug, Default)]
struct TableRows {
    /// Rows keyed by insertion sequence
    by_seq: BTreeMap<u64, Arc<StoredRow>>,
    /// Primary key index: id -> seq
    by_id: FxHashMap<String, u64>,
    /// Next sequence number (never reused)
    next_seq: u64,
    /// Set once the table is dropped
    dropped: bool,
}

#[derive(Debug)]
struct Table {
    info: TableInfo,
    rows: RwLock<TableRows>,
}

/// In-memory implementation of [`RecordStore`]
///
/// Thread-safe: all methods take `&self`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: DashMap<String, Arc<Table>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tables currently held
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Resolve the table for a handle
    ///
    /// The registry guard is released before the caller takes the row lock.
    fn resolve(&self, info: &TableInfo) -> StorageResult<Arc<Table>> {
        let table = self
            .tables
            .get(&info.name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| not_found(info))?;
        if table.info.uid != info.uid {
            return Err(not_found(info));
        }
        Ok(table)
    }
}

fn not_found(info: &TableInfo) -> StorageError {
    StorageError::TableNotFound {
        name: info.name.clone(),
    }
}

impl RecordStore for MemoryStore {
    fn create_table(&self, name: &str, config: CollectionConfig) -> StorageResult<TableInfo> {
        match self.tables.entry(name.to_string()) {
            Entry::Occupied(_) => Err(StorageError::TableExists {
                name: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                let info = TableInfo {
                    name: name.to_string(),
                    uid: Uuid::new_v4(),
                    config,
                    created_at: Utc::now().timestamp_micros(),
                };
                slot.insert(Arc::new(Table {
                    info: info.clone(),
                    rows: RwLock::new(TableRows::default()),
                }));
                debug!(target: "stratavec::storage", table = name, uid = %info.uid, "Created table");
                Ok(info)
            }
        }
    }

    fn describe_table(&self, name: &str) -> StorageResult<Option<TableInfo>> {
        Ok(self.tables.get(name).map(|entry| entry.info.clone()))
    }

    fn drop_table(&self, info: &TableInfo) -> StorageResult<()> {
        let (_, table) = self
            .tables
            .remove_if(&info.name, |_, table| table.info.uid == info.uid)
            .ok_or_else(|| not_found(info))?;

        let mut rows = table.rows.write();
        let removed = rows.by_seq.len();
        rows.dropped = true;
        rows.by_seq.clear();
        rows.by_id.clear();
        debug!(target: "stratavec::storage", table = %info.name, removed, "Dropped table");
        Ok(())
    }

    fn list_tables(&self) -> StorageResult<Vec<TableInfo>> {
        let mut infos: Vec<TableInfo> = self
            .tables
            .iter()
            .map(|entry| entry.info.clone())
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    fn insert_rows(&self, info: &TableInfo, rows: Vec<Record>) -> StorageResult<()> {
        let table = self.resolve(info)?;
        let mut guard = table.rows.write();
        if guard.dropped {
            return Err(not_found(info));
        }

        // Check the whole batch before touching any state.
        {
            let mut batch_ids = FxHashSet::default();
            for record in &rows {
                if guard.by_id.contains_key(&record.id) || !batch_ids.insert(record.id.as_str()) {
                    return Err(StorageError::DuplicateKey {
                        id: record.id.clone(),
                    });
                }
            }
        }

        let inserted = rows.len();
        for record in rows {
            let seq = guard.next_seq;
            guard.next_seq += 1;
            guard.by_id.insert(record.id.clone(), seq);
            guard.by_seq.insert(seq, Arc::new(StoredRow { seq, record }));
        }
        debug!(target: "stratavec::storage", table = %info.name, inserted, "Inserted rows");
        Ok(())
    }

    fn delete_rows(
        &self,
        info: &TableInfo,
        ids: Option<&[String]>,
        predicate: &dyn Fn(&Record) -> bool,
    ) -> StorageResult<usize> {
        let table = self.resolve(info)?;
        let mut guard = table.rows.write();
        if guard.dropped {
            return Err(not_found(info));
        }

        let candidates: Vec<u64> = match ids {
            Some(ids) => {
                let mut seqs: Vec<u64> = ids
                    .iter()
                    .filter_map(|id| guard.by_id.get(id).copied())
                    .collect();
                seqs.sort_unstable();
                seqs.dedup();
                seqs
            }
            None => guard.by_seq.keys().copied().collect(),
        };

        let doomed: Vec<u64> = candidates
            .into_iter()
            .filter(|seq| {
                guard
                    .by_seq
                    .get(seq)
                    .is_some_and(|row| predicate(&row.record))
            })
            .collect();

        for seq in &doomed {
            if let Some(row) = guard.by_seq.remove(seq) {
                guard.by_id.remove(&row.record.id);
            }
        }

        let removed = doomed.len();
        debug!(target: "stratavec::storage", table = %info.name, removed, "Deleted rows");
        Ok(removed)
    }

    fn scan(&self, info: &TableInfo) -> StorageResult<Vec<Arc<StoredRow>>> {
        let table = self.resolve(info)?;
        let guard = table.rows.read();
        if guard.dropped {
            return Err(not_found(info));
        }
        Ok(guard.by_seq.values().cloned().collect())
    }

    fn get_row(&self, info: &TableInfo, id: &str) -> StorageResult<Option<Arc<StoredRow>>> {
        let table = self.resolve(info)?;
        let guard = table.rows.read();
        if guard.dropped {
            return Err(not_found(info));
        }
        Ok(guard
            .by_id
            .get(id)
            .and_then(|seq| guard.by_seq.get(seq))
            .cloned())
    }

    fn row_count(&self, info: &TableInfo) -> StorageResult<usize> {
        let table = self.resolve(info)?;
        let guard = table.rows.read();
        if guard.dropped {
            return Err(not_found(info));
        }
        Ok(guard.by_seq.len())
    }
}
