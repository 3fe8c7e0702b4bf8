//! Backing store for stratavec collections
//!
//! This crate defines the [`RecordStore`] contract the engine runs against
//! and ships one implementation:
//! - [`MemoryStore`]: DashMap table registry with a per-table `RwLock`
//!
//! Tables are identified by name plus an incarnation [`uuid::Uuid`], so a
//! handle taken before a drop can never read or write a table recreated
//! under the same name.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use traits::{RecordStore, StoredRow, TableInfo};
