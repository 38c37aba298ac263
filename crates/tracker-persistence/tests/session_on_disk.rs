use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;
use tracker_core::{NotificationLevel, Notifier, ViewMode};
use tracker_domain::{ActionName, ActionRequest, ConfirmOutcome, Outcome};
use tracker_persistence::{JsonFileStore, LoadOrigin, PersistenceGateway, Session};

const WINDOW: Duration = Duration::from_millis(50);

async fn open(path: &Path) -> Session {
    let gateway = PersistenceGateway::new(Arc::new(JsonFileStore::new(path)), WINDOW);
    Session::open(gateway, ViewMode::Tree).await
}

fn add_project(session: &mut Session, name: &str) {
    let Outcome::Prompt(mut pending) = session.dispatch(ActionRequest::bare(ActionName::AddProject))
    else {
        panic!("expected prompt");
    };
    pending.form_mut().unwrap().set_name(name);
    assert!(matches!(session.confirm(pending), ConfirmOutcome::Applied(_)));
}

#[tokio::test]
async fn test_changes_survive_shutdown_and_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("tasks.json");

    let mut session = open(&path).await;
    assert_eq!(session.origin(), &LoadOrigin::Seeded);
    add_project(&mut session, "Persisted");
    let (result, _) = session.shutdown().await;
    assert!(result.ok);

    let reopened = open(&path).await;
    assert_eq!(reopened.origin(), &LoadOrigin::Loaded);
    let names: Vec<&str> = reopened
        .document()
        .projects
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["My First Project", "Persisted"]);
}

#[tokio::test]
async fn test_import_replaces_document_and_saves_immediately() {
    let dir = tempdir().unwrap();
    let source_path = dir.path().join("source.json");
    let target_path = dir.path().join("target.json");
    let exported = dir.path().join("exported.json");

    let mut source = open(&source_path).await;
    add_project(&mut source, "Shared");
    assert!(source.export(&exported).await.ok);
    let _ = source.shutdown().await;

    let mut target = open(&target_path).await;
    let imported = target.import(&exported).await;
    assert!(imported.ok);
    assert_eq!(imported.data, Some(3));

    // Written without waiting for the debounce window.
    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&target_path).unwrap()).unwrap();
    assert_eq!(on_disk[1]["name"], "Shared");

    let notes = target.drain_notifications();
    assert!(notes
        .iter()
        .any(|note| note.level == NotificationLevel::Success));
}

#[tokio::test]
async fn test_failed_import_keeps_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, b"[{\"id\": \"nope\"}]").unwrap();

    let mut session = open(&path).await;
    let before = session.document().clone();
    let result = session.import(&bad).await;
    assert!(!result.ok);
    assert_eq!(session.document(), &before);
}
