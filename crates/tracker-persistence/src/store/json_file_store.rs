use crate::store::atomic_writer::AtomicWriter;
use crate::traits::DocumentStore;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracker_core::TrackerResult;

/// JSON file-based document store
/// Implements the DocumentStore trait for a single document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a new JSON file store
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Backup path for a corrupt document, next to the original:
    /// `<stem>.corrupt-<UTC timestamp>.json`
    pub fn backup_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3f");
        self.path
            .with_file_name(format!("{}.corrupt-{}.json", stem, stamp))
    }
}

#[async_trait::async_trait]
impl DocumentStore for JsonFileStore {
    async fn read(&self) -> TrackerResult<Option<Vec<u8>>> {
        let bytes = AtomicWriter::read_all(&self.path).await?;
        if let Some(bytes) = &bytes {
            tracing::info!("Loaded {} bytes from {}", bytes.len(), self.path.display());
        }
        Ok(bytes)
    }

    async fn write(&self, bytes: &[u8]) -> TrackerResult<()> {
        AtomicWriter::write_atomic(&self.path, bytes).await?;
        tracing::info!("Saved {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    async fn preserve_corrupt(&self, bytes: &[u8]) -> TrackerResult<String> {
        let backup = self.backup_path();
        AtomicWriter::write_atomic(&backup, bytes).await?;
        tracing::warn!(
            "Preserved unreadable document {} at {}",
            self.path.display(),
            backup.display()
        );
        Ok(backup.display().to_string())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_and_read() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tasks.json");
        let store = JsonFileStore::new(&file_path);

        assert!(store.read().await.unwrap().is_none());

        store.write(b"[]").await.unwrap();
        assert!(file_path.exists());
        assert_eq!(store.read().await.unwrap().as_deref(), Some(&b"[]"[..]));
    }

    #[tokio::test]
    async fn test_preserve_corrupt_keeps_original_bytes() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json"));

        let location = store.preserve_corrupt(b"{broken").await.unwrap();
        let backup = PathBuf::from(&location);
        let name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("tasks.corrupt-"));
        assert!(name.ends_with(".json"));
        assert_eq!(std::fs::read(&backup).unwrap(), b"{broken");
    }

    #[test]
    fn test_backup_path_sits_beside_document() {
        let store = JsonFileStore::new("/data/tracker/tasks.json");
        assert_eq!(
            store.backup_path().parent(),
            Some(Path::new("/data/tracker"))
        );
    }
}
