//! Local file helpers used between pipeline stages.

use std::io;
use std::path::Path;
use tokio::fs;

/// Read a UTF-8 text file. Missing files and undecodable contents both
/// surface as IO errors (`NotFound` / `InvalidData`).
pub async fn read_text(path: &Path) -> io::Result<String> {
    fs::read_to_string(path).await
}

/// Write `bytes` to `path`, creating parent directories as needed and
/// replacing any existing file.
pub async fn write_bytes(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, bytes).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dirs/note.txt");

        write_bytes(&path, "hello".as_bytes()).await.unwrap();

        assert_eq!(read_text(&path).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_read_text_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_text(&dir.path().join("absent.txt")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_read_text_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        write_bytes(&path, &[0xff, 0xfe, 0x00, 0x01]).await.unwrap();

        let err = read_text(&path).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn test_write_bytes_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audio.mp3");

        write_bytes(&path, b"first, longer contents").await.unwrap();
        write_bytes(&path, b"second").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }
}
