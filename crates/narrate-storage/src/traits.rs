//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// The pipeline runs against it, so jobs never couple to a concrete backend.
///
/// **Key format:** keys are '/'-joined relative paths. See the crate root
/// documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Download the object at `key` into the local file `dest`.
    ///
    /// The object is fetched fully before `dest` is created, so a missing
    /// object never leaves a partial file behind. Parent directories of
    /// `dest` are created as needed. Returns the number of bytes written.
    async fn download(&self, key: &str, dest: &Path) -> StorageResult<u64>;

    /// Upload the local file `src` to the object at `key`, replacing any
    /// existing object. Returns the number of bytes sent.
    async fn upload(&self, src: &Path, key: &str) -> StorageResult<u64>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
