use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::path::Path;
use tokio::fs;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

impl S3Storage {
    /// Create a new S3Storage instance for the given bucket and region.
    ///
    /// Credentials come from the SDK's default provider chain (environment,
    /// shared profile, instance metadata).
    pub async fn new(bucket: String, region: String) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region))
            .load()
            .await;

        S3Storage {
            client: S3Client::new(&config),
            bucket,
        }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn download(&self, key: &str, dest: &Path) -> StorageResult<u64> {
        keys::validate_key(key)?;
        let start = std::time::Instant::now();

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_no_such_key() {
                    return StorageError::NotFound(key.to_string());
                }
                if err.code() == Some("AccessDenied") {
                    return StorageError::AccessDenied(key.to_string());
                }
                tracing::error!(
                    error = %err,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 download failed"
                );
                StorageError::DownloadFailed(err.to_string())
            })?;

        // Collect the whole object before creating the local file, so a
        // truncated transfer never leaves a partial file behind.
        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?
            .into_bytes();
        let size = data.len() as u64;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(dest, &data).await?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            dest = %dest.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(size)
    }

    async fn upload(&self, src: &Path, key: &str) -> StorageResult<u64> {
        keys::validate_key(key)?;
        let start = std::time::Instant::now();

        let data = fs::read(src).await?;
        let size = data.len() as u64;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.code() == Some("AccessDenied") {
                    return StorageError::AccessDenied(key.to_string());
                }
                tracing::error!(
                    error = %err,
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                StorageError::UploadFailed(err.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            src = %src.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(size)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
