use tracker_core::ViewMode;

use super::{Crumb, Row, View, ViewStrategy};
use crate::document::{Document, EntityKind};
use crate::id::EntityId;
use crate::navigation::NavigationState;

/// One level at a time: a breadcrumb of the current selection and the
/// children of its deepest entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrillDownViewStrategy;

impl ViewStrategy for DrillDownViewStrategy {
    fn mode(&self) -> ViewMode {
        ViewMode::DrillDown
    }

    fn render(&self, document: &Document, navigation: &NavigationState) -> View {
        if document.is_empty() {
            return View::empty();
        }

        let mut breadcrumbs = Vec::new();
        let project = navigation
            .selected_project()
            .and_then(|id| document.project(id));
        let task = navigation.selected_task().and_then(|id| document.task(id));
        let commit = navigation
            .selected_commit()
            .and_then(|id| document.commit(id));

        let (listing, items): (EntityKind, Vec<Row>) = match (project, task, commit) {
            (Some(project), Some(task), Some(commit)) => {
                breadcrumbs.push(crumb(EntityKind::Project, project.id, &project.name));
                breadcrumbs.push(crumb(EntityKind::Task, task.id, &task.name));
                breadcrumbs.push(crumb(EntityKind::Commit, commit.id, &commit.name));
                (EntityKind::File, commit.files.iter().map(Row::file).collect())
            }
            (Some(project), Some(task), None) => {
                breadcrumbs.push(crumb(EntityKind::Project, project.id, &project.name));
                breadcrumbs.push(crumb(EntityKind::Task, task.id, &task.name));
                (
                    EntityKind::Commit,
                    task.commits.iter().map(Row::commit).collect(),
                )
            }
            (Some(project), None, _) => {
                breadcrumbs.push(crumb(EntityKind::Project, project.id, &project.name));
                (
                    EntityKind::Task,
                    project.tasks.iter().map(Row::task).collect(),
                )
            }
            _ => (
                EntityKind::Project,
                document.projects.iter().map(Row::project).collect(),
            ),
        };

        View::DrillDown {
            breadcrumbs,
            listing,
            items: items.into_iter().map(flatten_depth).collect(),
        }
    }
}

fn crumb(kind: EntityKind, id: EntityId, label: &str) -> Crumb {
    Crumb {
        kind,
        id,
        label: label.to_string(),
    }
}

// Drill-down lists a single level, so rows sit at depth zero.
fn flatten_depth(mut row: Row) -> Row {
    row.depth = 0;
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityStore;

    #[test]
    fn test_root_lists_projects() {
        let mut store = EntityStore::default();
        store.create_project("Website").unwrap();
        store.create_project("Docs").unwrap();

        let view = DrillDownViewStrategy.render(store.document(), &NavigationState::new());
        match view {
            View::DrillDown {
                breadcrumbs,
                listing,
                items,
            } => {
                assert!(breadcrumbs.is_empty());
                assert_eq!(listing, EntityKind::Project);
                assert_eq!(items.len(), 2);
            }
            other => panic!("expected drill-down view, got {:?}", other),
        }
    }

    #[test]
    fn test_selected_task_lists_its_commits() {
        let mut store = EntityStore::default();
        let project = store.create_project("Website").unwrap().id;
        let task = store.create_task(project, "Landing").unwrap().id;
        store.create_commit(task, "Hero").unwrap();
        store.create_commit(task, "Footer").unwrap();

        let mut nav = NavigationState::new();
        nav.select_project(store.document(), project).unwrap();
        nav.select_task(store.document(), task).unwrap();

        let view = DrillDownViewStrategy.render(store.document(), &nav);
        let View::DrillDown {
            breadcrumbs,
            listing,
            items,
        } = view
        else {
            panic!("expected drill-down view");
        };
        let trail: Vec<_> = breadcrumbs.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(trail, vec!["Website", "Landing"]);
        assert_eq!(listing, EntityKind::Commit);
        let names: Vec<_> = items.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(names, vec!["Hero", "Footer"]);
        assert!(items.iter().all(|r| r.depth == 0));
    }

    #[test]
    fn test_project_without_tasks_is_not_empty_state() {
        let mut store = EntityStore::default();
        let project = store.create_project("Website").unwrap().id;
        let mut nav = NavigationState::new();
        nav.select_project(store.document(), project).unwrap();

        let view = DrillDownViewStrategy.render(store.document(), &nav);
        assert!(!view.is_empty());
        assert!(view.rows().is_empty());
    }

    #[test]
    fn test_selected_commit_lists_its_files() {
        let mut store = EntityStore::default();
        let project = store.create_project("Website").unwrap().id;
        let task = store.create_task(project, "Landing").unwrap().id;
        let commit = store.create_commit(task, "Hero").unwrap().id;
        store.create_file(commit, "hero.css", "styles").unwrap();

        let mut nav = NavigationState::new();
        nav.focus(store.document(), commit).unwrap();

        let View::DrillDown {
            breadcrumbs,
            listing,
            items,
        } = DrillDownViewStrategy.render(store.document(), &nav)
        else {
            panic!("expected drill-down view");
        };
        assert_eq!(breadcrumbs.len(), 3);
        assert_eq!(listing, EntityKind::File);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "hero.css");
        assert_eq!(items[0].description.as_deref(), Some("styles"));
    }
}
