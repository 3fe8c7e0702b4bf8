//! Core types for stratavec
//!
//! This crate defines the foundational pieces shared by storage and engine:
//! - Record / NewRecord / QueryResult: record and result types
//! - MetadataValue / Metadata: scalar metadata and its comparison rules
//! - FilterExpr: the metadata filter language (AST, compiler, evaluator)
//! - DistanceMetric: cosine and L2 distance functions
//! - VectorError: error taxonomy for all collection operations
//! - Validation of collection names and record ids

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod error;
pub mod filter;
pub mod types;
pub mod validation;
pub mod value;

pub use distance::DistanceMetric;
pub use error::{VectorError, VectorResult};
pub use filter::{compile_filter, compile_optional, Condition, FilterExpr, FilterOp, Operand};
pub use types::{CollectionConfig, CollectionInfo, NewRecord, QueryResult, Record};
pub use validation::{validate_collection_name, validate_record_id};
pub use value::{metadata_from_json, metadata_to_json, Metadata, MetadataValue};
