use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StaffingError, StaffingResult};
use crate::models::{Assignment, Engineer, EngineerDraft, NewAssignment, Project, ProjectDraft};
use crate::reconcile::Anchor;

/// Message used when a link points at a missing project or engineer.
pub const DANGLING_LINK: &str = "Assignment must reference an existing project and engineer";

/// Repository trait for Project persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All projects in creation order
    async fn list(&self) -> StaffingResult<Vec<Project>>;

    async fn get_by_id(&self, id: Uuid) -> StaffingResult<Option<Project>>;

    async fn create(&self, draft: ProjectDraft) -> StaffingResult<Project>;

    /// Replace every field; `None` if no such project
    async fn update(&self, id: Uuid, draft: ProjectDraft) -> StaffingResult<Option<Project>>;

    /// `true` if a row was removed
    async fn delete(&self, id: Uuid) -> StaffingResult<bool>;
}

/// Repository trait for Engineer persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngineerRepository: Send + Sync {
    async fn list(&self) -> StaffingResult<Vec<Engineer>>;

    async fn get_by_id(&self, id: Uuid) -> StaffingResult<Option<Engineer>>;

    async fn create(&self, draft: EngineerDraft) -> StaffingResult<Engineer>;

    async fn update(&self, id: Uuid, draft: EngineerDraft) -> StaffingResult<Option<Engineer>>;

    async fn delete(&self, id: Uuid) -> StaffingResult<bool>;
}

/// Repository trait for the project/engineer join table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn list(&self) -> StaffingResult<Vec<Assignment>>;

    /// Links hanging off one project or engineer
    async fn list_for(&self, anchor: Anchor) -> StaffingResult<Vec<Assignment>>;

    /// Fails with a validation error if either side does not exist
    async fn create(&self, link: NewAssignment) -> StaffingResult<Assignment>;

    async fn delete(&self, id: Uuid) -> StaffingResult<bool>;
}

#[derive(Debug, Default)]
struct Tables {
    projects: Vec<Project>,
    engineers: Vec<Engineer>,
    assignments: Vec<Assignment>,
}

/// In-memory implementation of all three repositories (for development/testing)
///
/// Rows keep insertion order. Deleting a project or engineer drops its links
/// under the same write lock, like the `ON DELETE CASCADE` foreign keys.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn list(&self) -> StaffingResult<Vec<Project>> {
        Ok(self.tables.read().await.projects.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> StaffingResult<Option<Project>> {
        let tables = self.tables.read().await;
        Ok(tables.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, draft: ProjectDraft) -> StaffingResult<Project> {
        let project = Project::new(draft);
        self.tables.write().await.projects.push(project.clone());

        tracing::info!(project_id = %project.id, "Created project");
        Ok(project)
    }

    async fn update(&self, id: Uuid, draft: ProjectDraft) -> StaffingResult<Option<Project>> {
        let mut tables = self.tables.write().await;
        let Some(slot) = tables.projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        *slot = slot.apply(draft);
        tracing::info!(project_id = %id, "Updated project");
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: Uuid) -> StaffingResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.projects.len();
        tables.projects.retain(|p| p.id != id);
        let removed = tables.projects.len() < before;

        let links = tables.assignments.len();
        tables.assignments.retain(|a| a.project_id != id);
        let cascaded = links - tables.assignments.len();

        if removed {
            tracing::info!(project_id = %id, cascaded, "Deleted project");
        }
        Ok(removed)
    }
}

#[async_trait]
impl EngineerRepository for InMemoryStore {
    async fn list(&self) -> StaffingResult<Vec<Engineer>> {
        Ok(self.tables.read().await.engineers.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> StaffingResult<Option<Engineer>> {
        let tables = self.tables.read().await;
        Ok(tables.engineers.iter().find(|e| e.id == id).cloned())
    }

    async fn create(&self, draft: EngineerDraft) -> StaffingResult<Engineer> {
        let engineer = Engineer::new(draft);
        self.tables.write().await.engineers.push(engineer.clone());

        tracing::info!(engineer_id = %engineer.id, "Created engineer");
        Ok(engineer)
    }

    async fn update(&self, id: Uuid, draft: EngineerDraft) -> StaffingResult<Option<Engineer>> {
        let mut tables = self.tables.write().await;
        let Some(slot) = tables.engineers.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        *slot = slot.apply(draft);
        tracing::info!(engineer_id = %id, "Updated engineer");
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: Uuid) -> StaffingResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.engineers.len();
        tables.engineers.retain(|e| e.id != id);
        let removed = tables.engineers.len() < before;

        let links = tables.assignments.len();
        tables.assignments.retain(|a| a.engineer_id != id);
        let cascaded = links - tables.assignments.len();

        if removed {
            tracing::info!(engineer_id = %id, cascaded, "Deleted engineer");
        }
        Ok(removed)
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryStore {
    async fn list(&self) -> StaffingResult<Vec<Assignment>> {
        Ok(self.tables.read().await.assignments.clone())
    }

    async fn list_for(&self, anchor: Anchor) -> StaffingResult<Vec<Assignment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .assignments
            .iter()
            .filter(|a| anchor.owns(a))
            .cloned()
            .collect())
    }

    async fn create(&self, link: NewAssignment) -> StaffingResult<Assignment> {
        let mut tables = self.tables.write().await;

        let project_exists = tables.projects.iter().any(|p| p.id == link.project_id);
        let engineer_exists = tables.engineers.iter().any(|e| e.id == link.engineer_id);
        if !project_exists || !engineer_exists {
            return Err(StaffingError::validation(DANGLING_LINK));
        }

        let assignment = Assignment::new(link);
        tables.assignments.push(assignment.clone());

        tracing::info!(
            assignment_id = %assignment.id,
            project_id = %assignment.project_id,
            engineer_id = %assignment.engineer_id,
            "Created assignment"
        );
        Ok(assignment)
    }

    async fn delete(&self, id: Uuid) -> StaffingResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.assignments.len();
        tables.assignments.retain(|a| a.id != id);
        let removed = tables.assignments.len() < before;

        if removed {
            tracing::info!(assignment_id = %id, "Deleted assignment");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectPriority, ProjectStatus};

    fn project_draft(name: &str) -> ProjectDraft {
        ProjectDraft {
            name: name.to_string(),
            status: ProjectStatus::Active,
            priority: ProjectPriority::Unprioritized,
            description: None,
        }
    }

    fn engineer_draft(name: &str) -> EngineerDraft {
        EngineerDraft {
            name: name.to_string(),
            role: "Data Engineer".to_string(),
        }
    }

    #[tokio::test]
    async fn test_project_lifecycle() {
        let store = InMemoryStore::new();

        let created = ProjectRepository::create(&store, project_draft("Portal")).await.unwrap();
        let fetched = ProjectRepository::get_by_id(&store, created.id).await.unwrap();
        assert_eq!(fetched, Some(created.clone()));

        let updated = ProjectRepository::update(&store, created.id, project_draft("Portal v2"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Portal v2");

        assert!(ProjectRepository::delete(&store, created.id).await.unwrap());
        assert!(!ProjectRepository::delete(&store, created.id).await.unwrap());
        assert!(ProjectRepository::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = InMemoryStore::new();
        let result = EngineerRepository::update(&store, Uuid::now_v7(), engineer_draft("Ana"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = InMemoryStore::new();
        for name in ["Ana", "Ben", "Cy"] {
            EngineerRepository::create(&store, engineer_draft(name)).await.unwrap();
        }

        let names: Vec<String> = EngineerRepository::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Ben", "Cy"]);
    }

    #[tokio::test]
    async fn test_link_requires_both_sides() {
        let store = InMemoryStore::new();
        let project = ProjectRepository::create(&store, project_draft("Portal")).await.unwrap();

        let err = AssignmentRepository::create(
            &store,
            NewAssignment {
                project_id: project.id,
                engineer_id: Uuid::now_v7(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, StaffingError::Validation(m) if m == vec![DANGLING_LINK]));
    }

    #[tokio::test]
    async fn test_list_for_filters_by_anchor() {
        let store = InMemoryStore::new();
        let p1 = ProjectRepository::create(&store, project_draft("One")).await.unwrap();
        let p2 = ProjectRepository::create(&store, project_draft("Two")).await.unwrap();
        let e = EngineerRepository::create(&store, engineer_draft("Ana")).await.unwrap();

        for project in [&p1, &p2] {
            AssignmentRepository::create(
                &store,
                NewAssignment {
                    project_id: project.id,
                    engineer_id: e.id,
                },
            )
            .await
            .unwrap();
        }

        let for_p1 = store.list_for(Anchor::Project(p1.id)).await.unwrap();
        assert_eq!(for_p1.len(), 1);
        assert_eq!(for_p1[0].project_id, p1.id);

        let for_e = store.list_for(Anchor::Engineer(e.id)).await.unwrap();
        assert_eq!(for_e.len(), 2);
    }

    async fn linked_pair(store: &InMemoryStore) -> (Project, Engineer) {
        let p = ProjectRepository::create(store, project_draft("Portal")).await.unwrap();
        let e = EngineerRepository::create(store, engineer_draft("Ana")).await.unwrap();
        AssignmentRepository::create(
            store,
            NewAssignment {
                project_id: p.id,
                engineer_id: e.id,
            },
        )
        .await
        .unwrap();
        (p, e)
    }

    #[tokio::test]
    async fn test_deleting_a_project_drops_its_links() {
        let store = InMemoryStore::new();
        let (p, e) = linked_pair(&store).await;

        assert!(ProjectRepository::delete(&store, p.id).await.unwrap());

        assert!(AssignmentRepository::list(&store).await.unwrap().is_empty());
        assert!(store.list_for(Anchor::Engineer(e.id)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_an_engineer_drops_its_links() {
        let store = InMemoryStore::new();
        let (p, e) = linked_pair(&store).await;
        let other = EngineerRepository::create(&store, engineer_draft("Ben")).await.unwrap();
        AssignmentRepository::create(
            &store,
            NewAssignment {
                project_id: p.id,
                engineer_id: other.id,
            },
        )
        .await
        .unwrap();

        assert!(EngineerRepository::delete(&store, e.id).await.unwrap());

        let remaining = store.list_for(Anchor::Project(p.id)).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].engineer_id, other.id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_link_racing_a_project_delete_never_dangles() {
        for _ in 0..50 {
            let store = InMemoryStore::new();
            let p = ProjectRepository::create(&store, project_draft("Portal")).await.unwrap();
            let e = EngineerRepository::create(&store, engineer_draft("Ana")).await.unwrap();

            let linker = store.clone();
            let link = tokio::spawn(async move {
                AssignmentRepository::create(
                    &linker,
                    NewAssignment {
                        project_id: p.id,
                        engineer_id: e.id,
                    },
                )
                .await
            });
            let deleter = store.clone();
            let delete =
                tokio::spawn(async move { ProjectRepository::delete(&deleter, p.id).await });

            let _ = link.await.unwrap();
            delete.await.unwrap().unwrap();

            assert!(AssignmentRepository::list(&store).await.unwrap().is_empty());
        }
    }
}
