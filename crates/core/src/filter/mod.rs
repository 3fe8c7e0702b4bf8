//! Metadata filter language
//!
//! - **ast**: [`FilterExpr`] tree (leaf comparisons, AND / OR combinators)
//! - **compile**: nested JSON mapping to [`FilterExpr`]
//! - **eval**: evaluation of a [`FilterExpr`] against record metadata
//!
//! ```
//! use serde_json::json;
//! use stratavec_core::filter::compile_filter;
//! use stratavec_core::value::metadata_from_json;
//!
//! let filter = compile_filter(&json!({"page": {"$gt": 1}, "category": "P1"})).unwrap();
//! let meta = metadata_from_json(&json!({"page": 2, "category": "P1"})).unwrap();
//! assert!(filter.matches(&meta));
//! ```

pub mod ast;
pub mod compile;
pub mod eval;

pub use ast::{Condition, FilterExpr, FilterOp, Operand};
pub use compile::{compile_filter, compile_optional, AND_KEY, OR_KEY};
