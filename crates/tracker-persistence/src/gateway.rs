//! Persistence gateway.
//!
//! The one place the document meets storage. Loading never fails on bad
//! data: a missing document is seeded, an unreadable one is backed up and
//! replaced by the seed. Storage failures come back as [`OperationResult`]s
//! or [`LoadOrigin`] variants, never as errors.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast;
use tracker_core::{TrackerError, TrackerResult};
use tracker_domain::{Document, IdGenerator};

use crate::save_worker::SaveHandle;
use crate::serialization::DocumentCodec;
use crate::store::AtomicWriter;
use crate::traits::{DocumentStore, OperationResult, PersistenceEvent};

/// Where a loaded document came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "kebab-case")]
pub enum LoadOrigin {
    /// Parsed from storage.
    Loaded,
    /// Nothing was stored; the seed was created and written.
    Seeded,
    /// Stored bytes were unreadable; they were copied to `backup` and the
    /// seed took their place.
    Recovered { backup: String },
    /// Storage could not be read at all; the seed is used in memory only.
    Unavailable { error: String },
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub document: Document,
    pub origin: LoadOrigin,
    /// Set when writing the seed back to storage failed.
    pub write_error: Option<String>,
}

pub struct PersistenceGateway {
    store: Arc<dyn DocumentStore>,
    saver: SaveHandle,
}

impl PersistenceGateway {
    /// Must be called inside a tokio runtime; spawns the save worker.
    pub fn new(store: Arc<dyn DocumentStore>, debounce: Duration) -> Self {
        let saver = SaveHandle::spawn(store.clone(), debounce);
        Self { store, saver }
    }

    pub fn location(&self) -> String {
        self.store.location()
    }

    pub async fn load(&self) -> LoadReport {
        let location = self.store.location();
        let bytes = match self.store.read().await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::info!("No document at {}, seeding default", location);
                return self.seed(LoadOrigin::Seeded).await;
            }
            Err(e) => {
                tracing::error!("Failed to read {}: {}", location, e);
                return LoadReport {
                    document: Document::seeded(&mut IdGenerator::new()),
                    origin: LoadOrigin::Unavailable {
                        error: e.to_string(),
                    },
                    write_error: None,
                };
            }
        };

        match DocumentCodec.decode(&bytes, &location) {
            Ok(document) => {
                tracing::info!(
                    "Loaded {} entities from {}",
                    document.entity_count(),
                    location
                );
                LoadReport {
                    document,
                    origin: LoadOrigin::Loaded,
                    write_error: None,
                }
            }
            Err(e) => {
                tracing::warn!("{}", e);
                match self.store.preserve_corrupt(&bytes).await {
                    Ok(backup) => self.seed(LoadOrigin::Recovered { backup }).await,
                    // Without a backup the original bytes stay where they are.
                    Err(backup_error) => {
                        tracing::error!("Could not back up {}: {}", location, backup_error);
                        LoadReport {
                            document: Document::seeded(&mut IdGenerator::new()),
                            origin: LoadOrigin::Unavailable {
                                error: format!("{}; backup failed: {}", e, backup_error),
                            },
                            write_error: None,
                        }
                    }
                }
            }
        }
    }

    /// Overwrite storage with the seed document right away.
    pub async fn reset(&self) -> OperationResult<Document> {
        let document = Document::seeded(&mut IdGenerator::new());
        tracing::info!("Resetting {} to the default document", self.store.location());
        self.write_now(&document).await.map(|_| document)
    }

    async fn seed(&self, origin: LoadOrigin) -> LoadReport {
        let document = Document::seeded(&mut IdGenerator::new());
        let write_error = self.write_now(&document).await.error;
        LoadReport {
            document,
            origin,
            write_error,
        }
    }

    async fn write_now(&self, document: &Document) -> OperationResult<()> {
        let result = async {
            let bytes = DocumentCodec.encode(document)?;
            self.store.write(&bytes).await
        }
        .await;
        result.into()
    }

    /// Queue a debounced save.
    pub fn save(&self, document: Document) {
        self.saver.request(document);
    }

    pub async fn flush(&self) -> OperationResult<()> {
        self.saver.flush().await
    }

    /// Flush pending work and stop the save worker.
    pub async fn shutdown(&mut self) -> OperationResult<()> {
        self.saver.shutdown().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PersistenceEvent> {
        self.saver.subscribe()
    }

    /// Write `document` to a caller-chosen path, outside the debounce.
    pub async fn export_to(&self, path: &Path, document: &Document) -> OperationResult<PathBuf> {
        let result = async {
            let bytes = DocumentCodec.encode(document)?;
            AtomicWriter::write_atomic(path, &bytes).await?;
            tracing::info!("Exported {} bytes to {}", bytes.len(), path.display());
            Ok::<_, TrackerError>(path.to_path_buf())
        }
        .await;
        if let Err(e) = &result {
            tracing::error!("Export to {} failed: {}", path.display(), e);
        }
        result.into()
    }

    /// Read and fully parse a document from a caller-chosen path, then
    /// persist it to the default location immediately.
    ///
    /// Nothing is written unless the whole file parses.
    pub async fn import_from(&self, path: &Path) -> OperationResult<Document> {
        let document = match Self::read_document(path).await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("Import from {} failed: {}", path.display(), e);
                return OperationResult::failure(e);
            }
        };
        tracing::info!(
            "Imported {} entities from {}",
            document.entity_count(),
            path.display()
        );

        self.saver.request(document.clone());
        let flushed = self.saver.flush().await;
        if !flushed.ok {
            return OperationResult {
                ok: false,
                error: flushed.error,
                data: Some(document),
            };
        }
        OperationResult::success(document)
    }

    async fn read_document(path: &Path) -> TrackerResult<Document> {
        let location = path.display().to_string();
        let bytes = AtomicWriter::read_all(path)
            .await?
            .ok_or_else(|| TrackerError::NotFound(location.clone()))?;
        DocumentCodec.decode(&bytes, &location)
    }
}
