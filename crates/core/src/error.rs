//! Error types for stratavec collections
//!
//! Every operation reports failures synchronously through [`VectorError`].
//! Nothing is retried by the core; a failed call leaves no side effects.

use thiserror::Error;

/// Errors returned by collection, filter and distance operations
#[derive(Debug, Error)]
pub enum VectorError {
    /// Filter mapping could not be compiled into a predicate
    #[error("Invalid filter: {reason}")]
    FilterCompile {
        /// Why the filter was rejected
        reason: String,
    },

    /// Record id collides with an existing record or another record of the batch
    #[error("Duplicate key: {id}")]
    DuplicateKey {
        /// The colliding record id
        id: String,
    },

    /// Collection with given name was not found (or was dropped)
    #[error("Collection not found: {name}")]
    CollectionNotFound {
        /// Collection name
        name: String,
    },

    /// Collection with given name already exists
    #[error("Collection already exists: {name}")]
    CollectionAlreadyExists {
        /// Collection name
        name: String,
    },

    /// Embedding length doesn't match the collection dimension
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension from collection config
        expected: usize,
        /// Actual dimension of provided vector
        got: usize,
    },

    /// Invalid dimension specified at collection creation
    #[error("Invalid dimension: {dimension} (must be between 1 and {max})")]
    InvalidDimension {
        /// The invalid dimension value
        dimension: usize,
        /// Largest accepted dimension
        max: usize,
    },

    /// Collection name is invalid
    #[error("Invalid collection name: {name} ({reason})")]
    InvalidCollectionName {
        /// The invalid name
        name: String,
        /// Reason why it's invalid
        reason: String,
    },

    /// Record id is invalid
    #[error("Invalid key: {key} ({reason})")]
    InvalidKey {
        /// The invalid key
        key: String,
        /// Reason why it's invalid
        reason: String,
    },

    /// Embedding contains NaN or infinite components
    #[error("Invalid embedding: component {index} is not finite")]
    InvalidEmbedding {
        /// Position of the first offending component
        index: usize,
    },

    /// Metadata is not a flat mapping of scalars
    #[error("Invalid metadata: {reason}")]
    InvalidMetadata {
        /// Why the metadata was rejected
        reason: String,
    },

    /// Caller supplied inconsistent arguments
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the problem
        message: String,
    },

    /// Configuration could not be read or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl VectorError {
    /// Build a filter compile error
    pub fn filter(reason: impl Into<String>) -> Self {
        VectorError::FilterCompile {
            reason: reason.into(),
        }
    }

    /// Build an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        VectorError::InvalidInput {
            message: message.into(),
        }
    }

    /// Check if this error indicates the collection was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, VectorError::CollectionNotFound { .. })
    }

    /// Check if this error is a validation error
    ///
    /// Validation errors are raised before the backing store is touched.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            VectorError::FilterCompile { .. }
                | VectorError::DimensionMismatch { .. }
                | VectorError::InvalidDimension { .. }
                | VectorError::InvalidCollectionName { .. }
                | VectorError::InvalidKey { .. }
                | VectorError::InvalidEmbedding { .. }
                | VectorError::InvalidMetadata { .. }
                | VectorError::InvalidInput { .. }
        )
    }
}

/// Result type alias for vector operations
pub type VectorResult<T> = Result<T, VectorError>;
