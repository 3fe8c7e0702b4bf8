//! Name and id validation
//!
//! Checked before any store access so that invalid input never reaches the
//! backing store.

use crate::error::{VectorError, VectorResult};

/// Longest accepted collection name, in bytes
pub const MAX_COLLECTION_NAME_LEN: usize = 256;

/// Longest accepted record id, in bytes
pub const MAX_RECORD_ID_LEN: usize = 1024;

/// Validate a collection name
///
/// # Validation Rules
/// - Cannot be empty
/// - Cannot exceed 256 bytes
/// - Cannot contain '/' or null bytes
/// - Cannot start with '_' (reserved for system use)
pub fn validate_collection_name(name: &str) -> VectorResult<()> {
    let reject = |reason: &str| {
        Err(VectorError::InvalidCollectionName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return reject("Collection name cannot be empty");
    }
    if name.len() > MAX_COLLECTION_NAME_LEN {
        return reject("Collection name cannot exceed 256 characters");
    }
    if name.contains('/') {
        return reject("Collection name cannot contain '/'");
    }
    if name.contains('\0') {
        return reject("Collection name cannot contain null bytes");
    }
    if name.starts_with('_') {
        return reject("Collection names starting with '_' are reserved");
    }
    Ok(())
}

/// Validate a caller-supplied record id
///
/// # Validation Rules
/// - Can be empty
/// - Cannot exceed 1024 bytes
/// - Cannot contain null bytes
pub fn validate_record_id(id: &str) -> VectorResult<()> {
    if id.len() > MAX_RECORD_ID_LEN {
        return Err(VectorError::InvalidKey {
            key: id.to_string(),
            reason: "Record id cannot exceed 1024 characters".to_string(),
        });
    }
    if id.contains('\0') {
        return Err(VectorError::InvalidKey {
            key: id.to_string(),
            reason: "Record id cannot contain null bytes".to_string(),
        });
    }
    Ok(())
}
