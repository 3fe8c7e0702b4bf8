//! Collection engine for stratavec
//!
//! This crate ties the filter language and distance functions from
//! `stratavec-core` to a `stratavec-storage` record store:
//! - VectorDb: collection lifecycle (create, get, list, drop)
//! - Collection: insert, delete and filtered top-k query
//! - Query evaluation: exact scan, filter, rank
//! - Configuration via `stratavec.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod config;
pub mod database;
pub mod query;

pub use collection::Collection;
pub use config::{StratavecConfig, CONFIG_FILE_NAME};
pub use database::{CreateOptions, VectorDb};
