//! Debounced background saving.
//!
//! Save requests are queued on an unbounded channel and collapsed by a
//! trailing-edge timer: every request restarts the quiet window, and only
//! the newest document is written once the window passes without another
//! request. Closing the channel makes the worker flush whatever is pending
//! before it exits.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracker_domain::Document;

use crate::serialization::DocumentCodec;
use crate::traits::{DocumentStore, OperationResult, PersistenceEvent};

const EVENT_CAPACITY: usize = 32;

enum SaveMessage {
    Save(Document),
    Flush(oneshot::Sender<OperationResult<()>>),
}

/// Handle to the save worker task.
pub struct SaveHandle {
    save_tx: Option<mpsc::UnboundedSender<SaveMessage>>,
    events: broadcast::Sender<PersistenceEvent>,
    worker: Option<JoinHandle<()>>,
}

impl SaveHandle {
    /// Spawn the worker on the current tokio runtime.
    pub fn spawn(store: Arc<dyn DocumentStore>, debounce: Duration) -> Self {
        let (save_tx, save_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let worker = tokio::spawn(run(store, debounce, save_rx, events.clone()));
        Self {
            save_tx: Some(save_tx),
            events,
            worker: Some(worker),
        }
    }

    /// Queue a save of `document`. Returns immediately.
    pub fn request(&self, document: Document) {
        match &self.save_tx {
            Some(tx) => {
                tracing::debug!("Queueing document for debounced save");
                if let Err(e) = tx.send(SaveMessage::Save(document)) {
                    tracing::error!("Failed to queue save: channel closed: {:?}", e.0.kind());
                }
            }
            None => tracing::debug!("Save channel closed - skipping save"),
        }
    }

    /// Write any pending document now, without waiting for the timer.
    pub async fn flush(&self) -> OperationResult<()> {
        let Some(tx) = &self.save_tx else {
            return OperationResult::failure("save worker already shut down");
        };
        let (reply_tx, reply_rx) = oneshot::channel();
        if tx.send(SaveMessage::Flush(reply_tx)).is_err() {
            return OperationResult::failure("save worker stopped");
        }
        reply_rx
            .await
            .unwrap_or_else(|_| OperationResult::failure("save worker stopped"))
    }

    /// Flush, close the channel and wait for the worker to exit.
    pub async fn shutdown(&mut self) -> OperationResult<()> {
        let result = if self.save_tx.is_some() {
            self.flush().await
        } else {
            OperationResult::done()
        };
        self.save_tx = None;
        if let Some(worker) = self.worker.take() {
            if let Err(e) = worker.await {
                tracing::error!("Save worker ended abnormally: {}", e);
                return OperationResult::failure(e);
            }
        }
        result
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PersistenceEvent> {
        self.events.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.save_tx.is_some()
    }
}

impl SaveMessage {
    fn kind(&self) -> &'static str {
        match self {
            SaveMessage::Save(_) => "save",
            SaveMessage::Flush(_) => "flush",
        }
    }
}

async fn run(
    store: Arc<dyn DocumentStore>,
    debounce: Duration,
    mut save_rx: mpsc::UnboundedReceiver<SaveMessage>,
    events: broadcast::Sender<PersistenceEvent>,
) {
    let mut pending: Option<Document> = None;
    let mut deadline: Option<Instant> = None;

    loop {
        tokio::select! {
            message = save_rx.recv() => match message {
                Some(SaveMessage::Save(document)) => {
                    pending = Some(document);
                    deadline = Some(Instant::now() + debounce);
                }
                Some(SaveMessage::Flush(reply)) => {
                    deadline = None;
                    let result = write_pending(store.as_ref(), &mut pending, &events).await;
                    let _ = reply.send(result);
                }
                None => {
                    write_pending(store.as_ref(), &mut pending, &events).await;
                    tracing::debug!("Save channel closed, worker exiting");
                    break;
                }
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                write_pending(store.as_ref(), &mut pending, &events).await;
            }
        }
    }
}

async fn write_pending(
    store: &dyn DocumentStore,
    pending: &mut Option<Document>,
    events: &broadcast::Sender<PersistenceEvent>,
) -> OperationResult<()> {
    let Some(document) = pending.take() else {
        return OperationResult::done();
    };
    let location = store.location();

    let written = match DocumentCodec.encode(&document) {
        Ok(bytes) => store.write(&bytes).await.map(|_| bytes.len()),
        Err(e) => Err(e),
    };

    let (event, result) = match written {
        Ok(bytes) => (
            PersistenceEvent::Saved {
                location,
                bytes,
                saved_at: Utc::now(),
            },
            OperationResult::done(),
        ),
        Err(e) => {
            tracing::error!("Failed to save {}: {}", location, e);
            (
                PersistenceEvent::Failed {
                    location,
                    error: e.to_string(),
                },
                OperationResult::failure(e),
            )
        }
    };
    // No subscribers is fine.
    let _ = events.send(event);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use tracker_domain::{EntityStore, IdGenerator};

    const WINDOW: Duration = Duration::from_millis(500);

    fn spawn(store: &Arc<MemoryStore>) -> SaveHandle {
        SaveHandle::spawn(store.clone(), WINDOW)
    }

    fn document_named(name: &str) -> Document {
        let mut store = EntityStore::default();
        store.create_project(name).unwrap();
        store.into_document()
    }

    fn persisted(store: &MemoryStore) -> Document {
        DocumentCodec
            .decode(&store.contents().unwrap(), "memory")
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_into_one_write_of_latest() {
        let store = Arc::new(MemoryStore::new());
        let handle = spawn(&store);

        for i in 0..10 {
            handle.request(document_named(&format!("v{}", i)));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(store.write_count(), 0);

        tokio::time::sleep(WINDOW).await;
        assert_eq!(store.write_count(), 1);
        assert_eq!(persisted(&store).projects[0].name, "v9");
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_waits_for_quiet_window() {
        let store = Arc::new(MemoryStore::new());
        let handle = spawn(&store);

        handle.request(document_named("first"));
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(store.write_count(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_write_separately() {
        let store = Arc::new(MemoryStore::new());
        let handle = spawn(&store);

        handle.request(document_named("a"));
        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.request(document_named("b"));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_writes_immediately() {
        let store = Arc::new(MemoryStore::new());
        let handle = spawn(&store);

        handle.request(document_named("now"));
        assert!(handle.flush().await.is_ok());
        assert_eq!(store.write_count(), 1);

        // Nothing pending: the timer must not write again.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_without_pending_is_ok_and_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let handle = spawn(&store);
        assert!(handle.flush().await.is_ok());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_flushes_pending_save() {
        let store = Arc::new(MemoryStore::new());
        let mut handle = spawn(&store);

        handle.request(document_named("last words"));
        assert!(handle.shutdown().await.is_ok());
        assert_eq!(store.write_count(), 1);
        assert_eq!(persisted(&store).projects[0].name, "last words");
        assert!(!handle.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_write_is_reported_not_raised() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_writes(true);
        let handle = spawn(&store);
        let mut events = handle.subscribe();

        handle.request(Document::seeded(&mut IdGenerator::new()));
        let result = handle.flush().await;
        assert!(!result.ok);
        assert!(result.error.is_some());
        assert!(matches!(
            events.recv().await.unwrap(),
            PersistenceEvent::Failed { .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_save_is_published() {
        let store = Arc::new(MemoryStore::new());
        let handle = spawn(&store);
        let mut events = handle.subscribe();

        handle.request(document_named("published"));
        tokio::time::sleep(WINDOW * 2).await;
        assert!(events.recv().await.unwrap().is_saved());
    }
}
