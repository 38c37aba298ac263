use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracker_core::TrackerResult;

/// Trait for the storage collaborator behind the gateway
/// Implementations handle different backends (file on disk, memory, ...)
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the persisted bytes, or `None` when nothing has been written yet
    async fn read(&self) -> TrackerResult<Option<Vec<u8>>>;

    /// Replace the persisted bytes
    async fn write(&self, bytes: &[u8]) -> TrackerResult<()>;

    /// Keep a copy of unreadable bytes somewhere safe and say where
    async fn preserve_corrupt(&self, bytes: &[u8]) -> TrackerResult<String>;

    /// Human-readable location of the persisted document
    fn location(&self) -> String;
}

/// Trait for serialization/deserialization strategies
pub trait Serializer<T: Send + Sync>: Send + Sync {
    /// Serialize data to bytes
    fn serialize(&self, data: &T) -> TrackerResult<Vec<u8>>;

    /// Deserialize data from bytes
    fn deserialize(&self, bytes: &[u8]) -> TrackerResult<T>;
}

/// Events emitted by the save worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceEvent {
    /// A document was written
    Saved {
        location: String,
        bytes: usize,
        saved_at: DateTime<Utc>,
    },
    /// A write failed; the in-memory document is unaffected
    Failed { location: String, error: String },
}

impl PersistenceEvent {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistenceEvent::Saved { .. })
    }
}

/// Tagged result handed across the persistence boundary
///
/// Storage failures never propagate as errors past the gateway; callers get
/// `ok: false` and a message instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> OperationResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn failure(error: impl fmt::Display) -> Self {
        Self {
            ok: false,
            error: Some(error.to_string()),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U> {
        OperationResult {
            ok: self.ok,
            error: self.error,
            data: self.data.map(f),
        }
    }
}

impl<T> From<TrackerResult<T>> for OperationResult<T> {
    fn from(result: TrackerResult<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(err),
        }
    }
}

impl OperationResult<()> {
    pub fn done() -> Self {
        Self::success(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tracker_core::TrackerError;

    #[test]
    fn test_failure_serializes_ok_false_with_error() {
        let err = TrackerError::Io(io::Error::new(io::ErrorKind::Other, "disk full"));
        let result: OperationResult<()> = Err(err).into();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["ok"], false);
        assert!(json["error"].as_str().unwrap().contains("disk full"));
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_success_carries_data() {
        let result = OperationResult::from(Ok::<_, TrackerError>(3));
        assert!(result.is_ok());
        assert_eq!(result.data, Some(3));
    }
}
