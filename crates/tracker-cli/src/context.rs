use anyhow::{anyhow, bail};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracker_core::{AppConfig, NotificationLevel, ViewMode};
use tracker_domain::{
    ActionRequest, ConfirmOutcome, Effect, EntityId, EntityKind, Form, Found, Outcome, Prompt,
};
use tracker_persistence::{JsonFileStore, PersistenceGateway, Session};

/// Answer to a delete that was not confirmed with `--yes`.
#[derive(Debug, Clone, Serialize)]
pub struct CancelledDelete {
    pub cancelled: bool,
    pub title: String,
    pub message: String,
}

pub struct CliContext {
    session: Session,
}

impl CliContext {
    pub async fn open(
        path: &Path,
        reset: bool,
        config: &AppConfig,
        view: ViewMode,
    ) -> anyhow::Result<Self> {
        let store = Arc::new(JsonFileStore::new(path));
        let gateway = PersistenceGateway::new(store, config.effective_save_debounce());

        if reset {
            let result = gateway.reset().await;
            if !result.ok {
                bail!(
                    "Failed to reset {}: {}",
                    path.display(),
                    result.error.unwrap_or_default()
                );
            }
        }

        let session = Session::open(gateway, view).await;
        Ok(Self { session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Drive one action through the prompt protocol: begin, fill in the
    /// form, confirm.
    pub fn submit(
        &mut self,
        request: ActionRequest,
        fill: impl FnOnce(&mut Form),
    ) -> anyhow::Result<Effect> {
        match self.session.dispatch(request) {
            Outcome::Prompt(mut pending) => {
                if let Some(form) = pending.form_mut() {
                    fill(form);
                }
                match self.session.confirm(pending) {
                    ConfirmOutcome::Applied(effect) => Ok(effect),
                    ConfirmOutcome::StillOpen { pending, reason } => {
                        self.session.cancel(pending);
                        Err(anyhow!(reason))
                    }
                    ConfirmOutcome::Dismissed { reason } => Err(anyhow!(reason)),
                }
            }
            Outcome::Applied(effect) => Ok(effect),
            Outcome::Ignored { reason } => Err(anyhow!(reason)),
        }
    }

    /// Delete after the yes/no prompt. Without `confirmed` the prompt is
    /// cancelled and its text handed back.
    pub fn delete(&mut self, request: ActionRequest, confirmed: bool) -> anyhow::Result<Value> {
        let pending = match self.session.dispatch(request) {
            Outcome::Prompt(pending) => pending,
            Outcome::Applied(_) => bail!("{} did not ask for confirmation", request.action),
            Outcome::Ignored { reason } => bail!(reason),
        };

        if !confirmed {
            let (title, message) = match pending.prompt() {
                Prompt::Confirm { title, message } => (title.clone(), message.clone()),
                Prompt::Form { title, .. } => (title.clone(), String::new()),
            };
            self.session.cancel(pending);
            return Ok(serde_json::to_value(CancelledDelete {
                cancelled: true,
                title,
                message,
            })?);
        }

        match self.session.confirm(pending) {
            ConfirmOutcome::Applied(effect) => {
                Ok(serde_json::json!({ "deleted": effect.touched }))
            }
            ConfirmOutcome::StillOpen { pending, reason } => {
                self.session.cancel(pending);
                Err(anyhow!(reason))
            }
            ConfirmOutcome::Dismissed { reason } => Err(anyhow!(reason)),
        }
    }

    /// Fail unless `id` names an entity of `kind`.
    pub fn expect_kind(&self, id: EntityId, kind: EntityKind) -> anyhow::Result<()> {
        let matches = self
            .session
            .workspace()
            .store
            .find_by_id(id)
            .is_some_and(|found| found.kind() == kind);
        if !matches {
            bail!("{} not found: {}", kind.title(), id);
        }
        Ok(())
    }

    /// JSON form of the entity with `id`.
    pub fn entity_json(&self, id: Option<EntityId>) -> anyhow::Result<Value> {
        let id = id.ok_or_else(|| anyhow!("action did not report an entity"))?;
        let found = self
            .session
            .workspace()
            .store
            .find_by_id(id)
            .ok_or_else(|| anyhow!("Entity not found: {}", id))?;
        let value = match found {
            Found::Project(project) => serde_json::to_value(project)?,
            Found::Task { task, .. } => serde_json::to_value(task)?,
            Found::Commit { commit, .. } => serde_json::to_value(commit)?,
            Found::File { file, .. } => serde_json::to_value(file)?,
        };
        Ok(value)
    }

    /// Flush pending saves and report what the session noticed.
    pub async fn finish(self) -> anyhow::Result<()> {
        let unsaved = self.session.has_unsaved_changes();
        let location = self.session.location();
        let (result, notifications) = self.session.shutdown().await;
        for notification in notifications {
            match notification.level {
                NotificationLevel::Error => tracing::error!("{}", notification.message),
                NotificationLevel::Warning => tracing::warn!("{}", notification.message),
                NotificationLevel::Info | NotificationLevel::Success => {
                    tracing::info!("{}", notification.message)
                }
            }
        }
        if !result.ok {
            bail!("Failed to save: {}", result.error.unwrap_or_default());
        }
        if unsaved {
            bail!(
                "Changes were not saved: {} could not be read or backed up; rerun with --reset to replace it",
                location
            );
        }
        Ok(())
    }
}
