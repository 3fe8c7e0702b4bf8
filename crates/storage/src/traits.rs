//! Record store abstraction
//!
//! The engine issues logical operations against [`RecordStore`]; how a
//! backend realizes them (in memory, SQL, remote service) is its own concern.
//!
//! A backend must provide:
//! 1. atomic multi-row insert with a primary-key uniqueness constraint
//! 2. atomic conditional delete by id set and/or predicate
//! 3. a consistent full-scan read path
//! 4. table existence checks and drop
//!
//! Every row operation names the table through a [`TableInfo`] obtained at
//! creation or lookup. A backend must reject it with
//! [`StorageError::TableNotFound`](crate::StorageError::TableNotFound) once
//! that incarnation of the table has been dropped, even if a new table with
//! the same name exists.

use crate::error::StorageResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stratavec_core::{CollectionConfig, Record};
use uuid::Uuid;

/// Identity and schema of one table incarnation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Table name
    pub name: String,
    /// Unique id of this incarnation, assigned at creation
    pub uid: Uuid,
    /// Embedding dimension and metric
    pub config: CollectionConfig,
    /// Creation timestamp (microseconds since epoch)
    pub created_at: i64,
}

/// A row as returned by scans
///
/// `seq` is the insertion sequence number, strictly increasing within a
/// table and never reused. Scans return rows in `seq` order.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    /// Insertion sequence number
    pub seq: u64,
    /// The stored record
    pub record: Record,
}

/// Backing store for collections
///
/// Thread safety: all methods may be called concurrently (requires Send + Sync).
/// Each mutation is atomic: concurrent readers observe either the state before
/// or after it, never a mix.
pub trait RecordStore: Send + Sync {
    /// Create an empty table
    ///
    /// # Errors
    /// `TableExists` if a table with this name exists.
    fn create_table(&self, name: &str, config: CollectionConfig) -> StorageResult<TableInfo>;

    /// Look up the current incarnation of a table
    fn describe_table(&self, name: &str) -> StorageResult<Option<TableInfo>>;

    /// Drop a table incarnation and all its rows
    ///
    /// # Errors
    /// `TableNotFound` if the table is absent or `table` names an earlier
    /// incarnation; a newer table under the same name is left untouched.
    fn drop_table(&self, table: &TableInfo) -> StorageResult<()>;

    /// List all tables, sorted by name
    fn list_tables(&self) -> StorageResult<Vec<TableInfo>>;

    /// Insert rows atomically
    ///
    /// Either every row is inserted or none is.
    ///
    /// # Errors
    /// `DuplicateKey` if any id already exists or repeats within `rows`.
    fn insert_rows(&self, table: &TableInfo, rows: Vec<Record>) -> StorageResult<()>;

    /// Delete rows atomically
    ///
    /// Removes every row whose id is in `ids` (all rows when `ids` is `None`)
    /// and for which `predicate` holds. Returns the number of rows removed.
    fn delete_rows(
        &self,
        table: &TableInfo,
        ids: Option<&[String]>,
        predicate: &dyn Fn(&Record) -> bool,
    ) -> StorageResult<usize>;

    /// Consistent snapshot of all rows, in insertion order
    fn scan(&self, table: &TableInfo) -> StorageResult<Vec<Arc<StoredRow>>>;

    /// Fetch a single row by id
    fn get_row(&self, table: &TableInfo, id: &str) -> StorageResult<Option<Arc<StoredRow>>>;

    /// Number of rows in the table
    fn row_count(&self, table: &TableInfo) -> StorageResult<usize>;
}
