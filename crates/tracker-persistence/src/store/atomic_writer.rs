use std::path::Path;
use tokio::fs;
use tracker_core::TrackerResult;

/// Atomic file writer that prevents data corruption
/// Uses write-to-temp-file → atomic-rename pattern for safety
pub struct AtomicWriter;

impl AtomicWriter {
    /// Write data to a file atomically, creating missing parent directories
    pub async fn write_atomic(path: &Path, data: &[u8]) -> TrackerResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        // Temp file in the same directory keeps the rename on one filesystem
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        let temp_path = temp_file.into_temp_path();

        fs::write(&temp_path, data).await?;
        fs::rename(&temp_path, path).await?;
        // Already renamed away; nothing left to clean up.
        let _ = temp_path.keep();

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// Read all data from a file, `None` if it does not exist
    pub async fn read_all(path: &Path) -> TrackerResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.json");
        let data = b"[]";

        AtomicWriter::write_atomic(&file_path, data).await.unwrap();

        let read_data = AtomicWriter::read_all(&file_path).await.unwrap();
        assert_eq!(read_data.as_deref(), Some(&data[..]));
    }

    #[tokio::test]
    async fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.json");

        AtomicWriter::write_atomic(&file_path, b"First")
            .await
            .unwrap();
        AtomicWriter::write_atomic(&file_path, b"Second")
            .await
            .unwrap();

        let read_data = AtomicWriter::read_all(&file_path).await.unwrap();
        assert_eq!(read_data.as_deref(), Some(&b"Second"[..]));
    }

    #[tokio::test]
    async fn test_atomic_write_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested").join("deeper").join("tasks.json");

        AtomicWriter::write_atomic(&file_path, b"[]").await.unwrap();
        assert!(file_path.exists());
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tasks.json");
        AtomicWriter::write_atomic(&file_path, b"[]").await.unwrap();

        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let dir = tempdir().unwrap();
        let read = AtomicWriter::read_all(&dir.path().join("absent.json"))
            .await
            .unwrap();
        assert!(read.is_none());
    }
}
