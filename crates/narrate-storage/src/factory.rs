#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use narrate_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            if config.bucket.trim().is_empty() {
                return Err(StorageError::ConfigError(
                    "NARRATE_BUCKET not configured".to_string(),
                ));
            }
            if config.region.trim().is_empty() {
                return Err(StorageError::ConfigError(
                    "NARRATE_REGION not configured".to_string(),
                ));
            }

            let storage = S3Storage::new(config.bucket.clone(), config.region.clone()).await;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let root = config.local_store.clone().ok_or_else(|| {
                StorageError::ConfigError("NARRATE_LOCAL_STORE not configured".to_string())
            })?;

            let storage = LocalStorage::new(root).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
