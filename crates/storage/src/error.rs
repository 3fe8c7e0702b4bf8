//! Errors from backing store operations

use stratavec_core::VectorError;
use thiserror::Error;

/// Errors from record store operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// Table does not exist, or the caller holds a stale incarnation of it
    #[error("Table not found: {name}")]
    TableNotFound {
        /// Table name
        name: String,
    },

    /// Table with this name already exists
    #[error("Table already exists: {name}")]
    TableExists {
        /// Table name
        name: String,
    },

    /// Primary key constraint violated
    #[error("Duplicate primary key: {id}")]
    DuplicateKey {
        /// The colliding row id
        id: String,
    },
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Conversion to VectorError
// =============================================================================

impl From<StorageError> for VectorError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::TableNotFound { name } => VectorError::CollectionNotFound { name },
            StorageError::TableExists { name } => VectorError::CollectionAlreadyExists { name },
            StorageError::DuplicateKey { id } => VectorError::DuplicateKey { id },
        }
    }
}
