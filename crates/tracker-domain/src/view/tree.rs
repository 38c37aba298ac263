use tracker_core::ViewMode;

use super::{Row, View, ViewStrategy};
use crate::document::Document;
use crate::navigation::NavigationState;

/// Whole document as one indented list. Children of collapsed projects and
/// tasks are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeViewStrategy;

impl ViewStrategy for TreeViewStrategy {
    fn mode(&self) -> ViewMode {
        ViewMode::Tree
    }

    fn render(&self, document: &Document, _navigation: &NavigationState) -> View {
        if document.is_empty() {
            return View::empty();
        }

        let mut rows = Vec::with_capacity(document.entity_count());
        for project in &document.projects {
            rows.push(Row::project(project));
            if project.is_collapsed {
                continue;
            }
            for task in &project.tasks {
                rows.push(Row::task(task));
                if task.is_collapsed {
                    continue;
                }
                for commit in &task.commits {
                    rows.push(Row::commit(commit));
                    rows.extend(commit.files.iter().map(Row::file));
                }
            }
        }
        View::Tree { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityKind, EntityStore};

    #[test]
    fn test_empty_document_renders_empty_state() {
        let view = TreeViewStrategy.render(&Document::new(), &NavigationState::new());
        assert!(view.is_empty());
    }

    #[test]
    fn test_rows_follow_document_order_with_depth() {
        let mut store = EntityStore::default();
        let project = store.create_project("Website").unwrap().id;
        let task = store.create_task(project, "Landing").unwrap().id;
        let commit = store.create_commit(task, "Hero").unwrap().id;
        store.create_file(commit, "hero.css", "styles").unwrap();

        let view = TreeViewStrategy.render(store.document(), &NavigationState::new());
        let shape: Vec<_> = view.rows().iter().map(|r| (r.depth, r.kind)).collect();
        assert_eq!(
            shape,
            vec![
                (0, EntityKind::Project),
                (1, EntityKind::Task),
                (2, EntityKind::Commit),
                (3, EntityKind::File),
            ]
        );
        assert_eq!(view.rows()[3].description.as_deref(), Some("styles"));
    }

    #[test]
    fn test_collapsed_entities_hide_children_only() {
        let mut store = EntityStore::default();
        let project = store.create_project("Website").unwrap().id;
        let task = store.create_task(project, "Landing").unwrap().id;
        store.create_commit(task, "Hero").unwrap();
        let other = store.create_project("Docs").unwrap().id;
        store.create_task(other, "Guide").unwrap();

        store.toggle_collapse(task).unwrap();
        store.toggle_collapse(other).unwrap();

        let view = TreeViewStrategy.render(store.document(), &NavigationState::new());
        let labels: Vec<_> = view.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Website", "Landing", "Docs"]);
    }
}
