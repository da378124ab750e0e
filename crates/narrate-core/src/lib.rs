//! Narrate Core Library
//!
//! This crate provides the configuration, key/path composition, and shared
//! types used by all narrate components.

pub mod audio;
pub mod config;
pub mod paths;
pub mod storage_types;

// Re-export commonly used types
pub use audio::AudioFormat;
pub use config::Config;
pub use paths::{join_key, JobLayout};
pub use storage_types::StorageBackend;
