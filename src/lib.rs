//! stratavec - filterable vector-similarity collections
//!
//! A collection stores records (id, document, embedding, scalar metadata)
//! and answers exact nearest-neighbor queries constrained by a boolean
//! metadata filter written in a Mongo-style JSON form.
//!
//! # Quick Start
//!
//! ```
//! use stratavec::{json, CreateOptions, NewRecord, VectorDb};
//!
//! let db = VectorDb::in_memory();
//! let docs = db.create_collection("docs", 3, CreateOptions::new())?;
//!
//! docs.insert(vec![
//!     NewRecord::new("foo", vec![1.0, 0.0, 0.0]).field("page", 1),
//!     NewRecord::new("bar", vec![0.0, 1.0, 0.0]).field("page", 2),
//! ])?;
//!
//! let hits = docs.query(&[1.0, 0.1, 0.0], 5, Some(&json!({"page": {"$gte": 2}})))?;
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].document, "bar");
//! # Ok::<(), stratavec::VectorError>(())
//! ```
//!
//! # Architecture
//!
//! - `stratavec-core`: filter language, metadata values, distance metrics, errors
//! - `stratavec-storage`: the [`RecordStore`] contract and [`MemoryStore`]
//! - `stratavec-engine`: [`VectorDb`] lifecycle, [`Collection`] operations, config

pub use serde_json::{json, Value as JsonValue};
pub use stratavec_core::*;
pub use stratavec_engine::{Collection, CreateOptions, StratavecConfig, VectorDb, CONFIG_FILE_NAME};
pub use stratavec_storage::{MemoryStore, RecordStore, StorageError, StoredRow, TableInfo};
