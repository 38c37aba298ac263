//! The host-facing context.
//!
//! A `Session` owns the workspace, the persistence gateway and the active
//! view strategy. It is the single writer: every action goes through
//! `&mut Session`, and every applied change that needs saving is handed to
//! the debounced saver before the call returns.

use std::path::{Path, PathBuf};

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracker_core::{Notification, Notifier, ViewMode};
use tracker_domain::{
    strategy_for, ActionRequest, ConfirmOutcome, Dispatcher, Document, Effect, Outcome,
    PendingAction, View, ViewStrategy, Workspace,
};

use crate::gateway::{LoadOrigin, PersistenceGateway};
use crate::traits::{OperationResult, PersistenceEvent};

pub struct Session {
    workspace: Workspace,
    gateway: PersistenceGateway,
    view: Box<dyn ViewStrategy>,
    events: broadcast::Receiver<PersistenceEvent>,
    notifications: Vec<Notification>,
    origin: LoadOrigin,
    /// Set while the stored bytes were neither read nor backed up. Saving
    /// would destroy them, so changes stay in memory until an import.
    saves_blocked: bool,
    /// Changes made while saves were blocked.
    unsaved: bool,
}

impl Session {
    /// Load the document through `gateway` and start a session on it.
    pub async fn open(gateway: PersistenceGateway, mode: ViewMode) -> Self {
        let report = gateway.load().await;
        let events = gateway.subscribe();
        let mut session = Self {
            workspace: Workspace::new(report.document),
            gateway,
            view: strategy_for(mode),
            events,
            notifications: Vec::new(),
            origin: report.origin.clone(),
            saves_blocked: matches!(report.origin, LoadOrigin::Unavailable { .. }),
            unsaved: false,
        };

        match &report.origin {
            LoadOrigin::Loaded => {}
            LoadOrigin::Seeded => session.notify(Notification::info(format!(
                "Created a new document at {}",
                session.gateway.location()
            ))),
            LoadOrigin::Recovered { backup } => session.notify(Notification::warning(format!(
                "Document was unreadable and has been reset; the original was saved to {}",
                backup
            ))),
            LoadOrigin::Unavailable { error } => session.notify(Notification::error(format!(
                "Could not read the document: {}",
                error
            ))),
        }
        if let Some(error) = report.write_error {
            session.notify(Notification::error(format!(
                "Failed to save the new document: {}",
                error
            )));
        }
        session
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn document(&self) -> &Document {
        self.workspace.document()
    }

    pub fn origin(&self) -> &LoadOrigin {
        &self.origin
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view.mode()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view = strategy_for(mode);
    }

    pub fn render(&self) -> View {
        self.view
            .render(self.workspace.document(), &self.workspace.navigation)
    }

    /// Start an action. Immediate actions are applied (and saved) here.
    pub fn dispatch(&mut self, request: ActionRequest) -> Outcome {
        self.collect_events();
        let outcome = Dispatcher::begin(&mut self.workspace, request);
        if let Outcome::Applied(effect) = &outcome {
            self.after(effect);
        }
        outcome
    }

    /// Answer a pending prompt with yes.
    pub fn confirm(&mut self, pending: PendingAction) -> ConfirmOutcome {
        self.collect_events();
        let outcome = Dispatcher::confirm(&mut self.workspace, pending);
        if let ConfirmOutcome::Applied(effect) = &outcome {
            self.after(effect);
        }
        outcome
    }

    pub fn cancel(&mut self, pending: PendingAction) {
        Dispatcher::cancel(pending);
    }

    fn after(&mut self, effect: &Effect) {
        if !effect.persist {
            return;
        }
        if self.saves_blocked {
            tracing::warn!(
                "Not saving to {}: the stored document was never backed up",
                self.gateway.location()
            );
            if !self.unsaved {
                self.notify(Notification::warning(format!(
                    "Changes are kept in memory only; {} was not backed up and will not be overwritten",
                    self.gateway.location()
                )));
            }
            self.unsaved = true;
            return;
        }
        self.gateway.save(self.workspace.document().clone());
    }

    /// True once a change was kept in memory because saving was blocked.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Where the document is persisted.
    pub fn location(&self) -> String {
        self.gateway.location()
    }

    pub fn saves_blocked(&self) -> bool {
        self.saves_blocked
    }

    pub async fn export(&mut self, path: &Path) -> OperationResult<PathBuf> {
        let result = self
            .gateway
            .export_to(path, self.workspace.document())
            .await;
        self.notify(match &result.error {
            None => Notification::success(format!("Exported to {}", path.display())),
            Some(error) => Notification::error(format!("Export failed: {}", error)),
        });
        result
    }

    /// Replace the whole document with the one at `path`.
    ///
    /// On failure the in-memory document is left exactly as it was.
    pub async fn import(&mut self, path: &Path) -> OperationResult<usize> {
        let result = self.gateway.import_from(path).await;
        let error = result.error.clone();

        let Some(document) = result.data else {
            let error = error.unwrap_or_default();
            self.notify(Notification::error(format!("Import failed: {}", error)));
            return OperationResult::failure(error);
        };

        let count = document.entity_count();
        self.workspace.replace_document(document);
        match error {
            None => {
                // The imported document now owns the location.
                self.saves_blocked = false;
                self.unsaved = false;
                self.notify(Notification::success(format!(
                    "Imported {} entities from {}",
                    count,
                    path.display()
                )));
                OperationResult::success(count)
            }
            Some(error) => {
                self.notify(Notification::warning(format!(
                    "Imported, but saving failed: {}",
                    error
                )));
                OperationResult {
                    ok: false,
                    error: Some(error),
                    data: Some(count),
                }
            }
        }
    }

    /// Write any pending save now.
    pub async fn flush(&mut self) -> OperationResult<()> {
        let result = self.gateway.flush().await;
        self.collect_events();
        result
    }

    /// Flush and stop the saver. Call before the process exits.
    pub async fn shutdown(mut self) -> (OperationResult<()>, Vec<Notification>) {
        let result = self.gateway.shutdown().await;
        self.collect_events();
        (result, self.drain_notifications())
    }

    /// Turn save failures reported by the worker into notifications.
    fn collect_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(PersistenceEvent::Failed { error, .. }) => {
                    self.notify(Notification::error(format!("Save failed: {}", error)))
                }
                Ok(PersistenceEvent::Saved { .. }) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Missed {} persistence events", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }
}

impl Notifier for Session {
    fn notify(&mut self, notification: Notification) {
        tracing::debug!("Notification: {}", notification.message);
        self.notifications.push(notification);
    }

    fn drain_notifications(&mut self) -> Vec<Notification> {
        self.collect_events();
        std::mem::take(&mut self.notifications)
    }
}
