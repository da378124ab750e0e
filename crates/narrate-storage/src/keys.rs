//! Shared key validation for storage backends.

use crate::traits::{StorageError, StorageResult};

/// Reject keys that are empty, absolute, or contain traversal sequences.
///
/// Both backends call this before any network or filesystem access so a bad
/// key fails the same way everywhere.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }

    if key.contains("..") || key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }

    Ok(())
}
