use crate::traits::DocumentStore;
use parking_lot::Mutex;
use tracker_core::{TrackerError, TrackerResult};

/// In-process document store for hosts without a disk, and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    current: Option<Vec<u8>>,
    backups: Vec<Vec<u8>>,
    writes: usize,
    fail_writes: bool,
    fail_backups: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with bytes already "on disk".
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.inner.lock().current = Some(bytes.into());
        store
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.inner.lock().current.clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }

    pub fn backups(&self) -> Vec<Vec<u8>> {
        self.inner.lock().backups.clone()
    }

    /// Make every following write fail, as a full disk would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().fail_writes = fail;
    }

    /// Make `preserve_corrupt` fail, as an unwritable backup directory would.
    pub fn set_fail_backups(&self, fail: bool) {
        self.inner.lock().fail_backups = fail;
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn read(&self) -> TrackerResult<Option<Vec<u8>>> {
        Ok(self.inner.lock().current.clone())
    }

    async fn write(&self, bytes: &[u8]) -> TrackerResult<()> {
        let mut state = self.inner.lock();
        if state.fail_writes {
            return Err(TrackerError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "write refused by memory store",
            )));
        }
        state.current = Some(bytes.to_vec());
        state.writes += 1;
        Ok(())
    }

    async fn preserve_corrupt(&self, bytes: &[u8]) -> TrackerResult<String> {
        let mut state = self.inner.lock();
        if state.fail_backups {
            return Err(TrackerError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "backup refused by memory store",
            )));
        }
        state.backups.push(bytes.to_vec());
        Ok(format!("memory://backup/{}", state.backups.len()))
    }

    fn location(&self) -> String {
        "memory://document".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_writes() {
        let store = MemoryStore::new();
        store.write(b"[]").await.unwrap();
        store.write(b"[1]").await.unwrap();
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.contents().as_deref(), Some(&b"[1]"[..]));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_contents() {
        let store = MemoryStore::with_contents(b"[]".to_vec());
        store.set_fail_writes(true);
        assert!(store.write(b"[1]").await.is_err());
        assert_eq!(store.contents().as_deref(), Some(&b"[]"[..]));
        assert_eq!(store.write_count(), 0);
    }
}
