use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem storage implementation
///
/// Objects live under a root directory; keys map directly to relative paths.
#[derive(Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance rooted at `root`, creating the
    /// directory if it does not exist.
    pub async fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(LocalStorage { root })
    }

    /// Convert a storage key to a filesystem path with traversal validation.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        keys::validate_key(key)?;

        let path = self.root.join(key);

        // Symlinks inside the store could still point elsewhere; check the
        // resolved path when the target already exists.
        if let Ok(canonical) = path.canonicalize() {
            let base = self.root.canonicalize().map_err(|e| {
                StorageError::ConfigError(format!("Failed to canonicalize store root: {}", e))
            })?;
            if canonical.strip_prefix(&base).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside the store root".to_string(),
                ));
            }
        }

        Ok(path)
    }

    async fn ensure_parent_dir(path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn download(&self, key: &str, dest: &Path) -> StorageResult<u64> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(key.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let size = data.len() as u64;

        Self::ensure_parent_dir(dest).await?;
        fs::write(dest, &data).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to write {}: {}", dest.display(), e))
        })?;

        tracing::info!(
            key = %key,
            dest = %dest.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(size)
    }

    async fn upload(&self, src: &Path, key: &str) -> StorageResult<u64> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        let data = fs::read(src).await?;
        let size = data.len() as u64;

        Self::ensure_parent_dir(&path).await?;
        fs::write(&path, &data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::info!(
            key = %key,
            src = %src.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(size)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn store_with_object(key: &str, data: &[u8]) -> (tempfile::TempDir, LocalStorage) {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("store")).await.unwrap();
        let object_path = dir.path().join("store").join(key);
        if let Some(parent) = object_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&object_path, data).unwrap();
        (dir, storage)
    }

    #[tokio::test]
    async fn test_download_writes_destination() {
        let (dir, storage) = store_with_object("audiobooks/input.txt", b"hello world").await;
        let dest = dir.path().join("work/downloads/input.txt");

        let size = storage.download("audiobooks/input.txt", &dest).await.unwrap();

        assert_eq!(size, 11);
        assert_eq!(std::fs::read(&dest).unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn test_download_missing_object_creates_no_file() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("store")).await.unwrap();
        let dest = dir.path().join("work/downloads/missing.txt");

        let result = storage.download("audiobooks/missing.txt", &dest).await;

        assert!(matches!(result, Err(StorageError::NotFound(_))));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_upload_download_round_trip() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("store")).await.unwrap();

        let src = dir.path().join("narration.zip");
        std::fs::write(&src, b"archive bytes").unwrap();

        let sent = storage.upload(&src, "audiobooks/narration.zip").await.unwrap();
        assert_eq!(sent, 13);

        let dest = dir.path().join("fetched.zip");
        storage.download("audiobooks/narration.zip", &dest).await.unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"archive bytes");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("store")).await.unwrap();
        let dest = dir.path().join("out.txt");

        let result = storage.download("../../../etc/passwd", &dest).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let src = dir.path().join("payload.txt");
        std::fs::write(&src, b"x").unwrap();
        let result = storage.upload(&src, "/etc/narrate").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_upload_missing_source_is_io_error() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("store")).await.unwrap();

        let result = storage
            .upload(&dir.path().join("does-not-exist.zip"), "audiobooks/a.zip")
            .await;

        assert!(matches!(result, Err(StorageError::IoError(_))));
    }

    #[tokio::test]
    async fn test_upload_overwrites_existing_object() {
        let (dir, storage) = store_with_object("audiobooks/out.zip", b"old").await;

        let src = dir.path().join("new.zip");
        std::fs::write(&src, b"new contents").unwrap();
        storage.upload(&src, "audiobooks/out.zip").await.unwrap();

        let dest = dir.path().join("fetched.zip");
        storage.download("audiobooks/out.zip", &dest).await.unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"new contents");
    }
}
