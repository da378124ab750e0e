//! Single-file ZIP archiving for finished narration audio.

use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Archive creation errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Sanitize a filename for use as an archive entry name.
/// Extracts only the base name (strips path components like `../`).
fn sanitize_entry_name(filename: &str, fallback: &str) -> String {
    Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or(fallback)
        .to_string()
}

/// Wrap the file at `src` in a single-entry ZIP archive written to `dest`.
///
/// The entry is stored under the source file's base name with deflate
/// compression. Parent directories of `dest` are created as needed and an
/// existing archive is replaced. Returns the archive size in bytes.
pub async fn archive_file(src: &Path, dest: &Path) -> Result<u64, ArchiveError> {
    use zip::write::{FileOptions, ZipWriter};
    use zip::CompressionMethod;

    let data = fs::read(src).await?;
    let entry_name = sanitize_entry_name(&src.to_string_lossy(), "narration");

    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(std::io::Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        zip.start_file(&entry_name, options)?;
        zip.write_all(&data)?;
        zip.finish()?;
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(dest, &buffer).await?;

    Ok(buffer.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_entry_name() {
        // Path components are stripped to the base name
        assert_eq!(sanitize_entry_name("../../etc/passwd", "fallback"), "passwd");
        assert_eq!(sanitize_entry_name("audio/input.mp3", "fallback"), "input.mp3");
        // Normal filenames unchanged
        assert_eq!(sanitize_entry_name("input.mp3", "fallback"), "input.mp3");
        // Edge cases use fallback
        assert_eq!(sanitize_entry_name("", "fallback"), "fallback");
        assert_eq!(sanitize_entry_name("..", "fallback"), "fallback");
        assert_eq!(sanitize_entry_name(".", "fallback"), "fallback");
    }

    #[tokio::test]
    async fn test_archive_round_trip() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("narration.mp3");
        tokio::fs::write(&src, b"fake mp3 bytes").await.unwrap();

        let dest = dir.path().join("archives/narration.zip");
        let size = archive_file(&src, &dest).await.unwrap();

        let bytes = std::fs::read(&dest).unwrap();
        assert_eq!(size, bytes.len() as u64);

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 1);

        let mut entry = archive.by_index(0).unwrap();
        assert_eq!(entry.name(), "narration.mp3");

        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"fake mp3 bytes");
    }

    #[tokio::test]
    async fn test_archive_missing_source() {
        let dir = tempdir().unwrap();
        let result = archive_file(
            &dir.path().join("absent.mp3"),
            &dir.path().join("out.zip"),
        )
        .await;

        assert!(matches!(result, Err(ArchiveError::Io(_))));
        assert!(!dir.path().join("out.zip").exists());
    }

    #[tokio::test]
    async fn test_archive_replaces_existing() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("narration.mp3");
        let dest = dir.path().join("narration.zip");

        tokio::fs::write(&src, b"take one").await.unwrap();
        let first = archive_file(&src, &dest).await.unwrap();

        tokio::fs::write(&src, b"take two, slightly longer").await.unwrap();
        archive_file(&src, &dest).await.unwrap();

        let bytes = std::fs::read(&dest).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut entry = archive.by_index(0).unwrap();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).unwrap();

        assert_eq!(contents, b"take two, slightly longer");
        assert!(first > 0);
    }
}
