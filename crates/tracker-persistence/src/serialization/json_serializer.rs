use crate::traits::Serializer;
use tracker_core::{TrackerError, TrackerResult};
use tracker_domain::Document;

/// JSON serializer for domain models
pub struct JsonSerializer;

impl<T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync> Serializer<T>
    for JsonSerializer
{
    fn serialize(&self, data: &T) -> TrackerResult<Vec<u8>> {
        let json = serde_json::to_vec_pretty(data)
            .map_err(|e| TrackerError::Serialization(e.to_string()))?;
        Ok(json)
    }

    fn deserialize(&self, bytes: &[u8]) -> TrackerResult<T> {
        let data = serde_json::from_slice(bytes)
            .map_err(|e| TrackerError::Serialization(e.to_string()))?;
        Ok(data)
    }
}

/// Codec for the persisted document: a pretty-printed top-level array of
/// projects. Anything else on the wire is reported as corruption.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentCodec;

impl DocumentCodec {
    pub fn encode(&self, document: &Document) -> TrackerResult<Vec<u8>> {
        JsonSerializer.serialize(document)
    }

    pub fn decode(&self, bytes: &[u8], location: &str) -> TrackerResult<Document> {
        let corrupt = |reason: String| TrackerError::Corrupt {
            location: location.to_string(),
            reason,
        };
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;
        if !value.is_array() {
            return Err(corrupt("top-level value is not an array of projects".to_string()));
        }
        serde_json::from_value(value).map_err(|e| corrupt(e.to_string()))
    }
}
