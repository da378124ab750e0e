//! Narrate Storage Library
//!
//! This crate provides the storage abstraction and backends for narrate.
//! Objects live in an S3 bucket or under a local directory, addressed by
//! relative keys.
//!
//! # Storage key format
//!
//! Keys are '/'-joined relative paths, typically `{base_path}/{prefix}/{file}`.
//! Keys must not contain `..` or a leading `/`; both backends reject such keys
//! before touching the network or the filesystem.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use narrate_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
