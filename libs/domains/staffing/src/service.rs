use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Resource, StaffingError, StaffingResult};
use crate::mirror::Mirror;
use crate::models::{
    Assignment, CreateAssignment, CreateEngineer, CreateProject, Engineer, EngineerFilter,
    Project, UpdateEngineer, UpdateProject,
};
use crate::overview::Overview;
use crate::reconcile::{Anchor, reconcile};
use crate::relations::{self, EngineerStats};
use crate::repository::{AssignmentRepository, EngineerRepository, ProjectRepository};

/// Result of a membership sync
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct SyncOutcome {
    /// Ids of the links that were deleted
    pub removed: Vec<Uuid>,
    /// Links that were created
    pub added: Vec<Assignment>,
}

/// Logs every failed operation of a phase and returns the first error.
fn first_failure<T>(
    anchor: Anchor,
    phase: &'static str,
    results: Vec<StaffingResult<T>>,
) -> StaffingResult<Vec<T>> {
    let mut values = Vec::with_capacity(results.len());
    let mut first = None;

    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(e) => {
                tracing::error!(
                    anchor_id = %anchor.id(),
                    phase,
                    error = %e,
                    "Assignment sync step failed"
                );
                first.get_or_insert(e);
            }
        }
    }

    match first {
        Some(e) => Err(e),
        None => Ok(values),
    }
}

/// Service layer for the project/engineer join table
pub struct AssignmentService<A: AssignmentRepository> {
    repository: Arc<A>,
}

impl<A: AssignmentRepository> Clone for AssignmentService<A> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<A: AssignmentRepository> AssignmentService<A> {
    pub fn new(repository: A) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list(&self) -> StaffingResult<Vec<Assignment>> {
        self.repository.list().await
    }

    pub async fn list_for(&self, anchor: Anchor) -> StaffingResult<Vec<Assignment>> {
        self.repository.list_for(anchor).await
    }

    pub async fn create(&self, input: CreateAssignment) -> StaffingResult<Assignment> {
        let link = input.into_link()?;
        self.repository.create(link).await
    }

    /// Succeeds whether or not the link existed.
    pub async fn delete(&self, id: Uuid) -> StaffingResult<()> {
        if !self.repository.delete(id).await? {
            tracing::debug!(assignment_id = %id, "Assignment already absent");
        }
        Ok(())
    }

    /// Makes the anchor's counterparts equal `desired`.
    ///
    /// Deletions run first, then insertions; each phase runs concurrently.
    /// A failure stops the sync after its phase and nothing is rolled back.
    pub async fn sync(&self, anchor: Anchor, desired: &[Uuid]) -> StaffingResult<SyncOutcome> {
        let current = self.repository.list_for(anchor).await?;
        let plan = reconcile(anchor, &current, desired);

        if plan.is_empty() {
            return Ok(SyncOutcome::default());
        }

        let removed: Vec<Uuid> = plan.to_remove.iter().map(|link| link.id).collect();
        let deletions = join_all(removed.iter().map(|id| self.repository.delete(*id))).await;
        first_failure(anchor, "delete", deletions)?;

        let insertions =
            join_all(plan.to_add.iter().map(|link| self.repository.create(*link))).await;
        let added = first_failure(anchor, "insert", insertions)?;

        tracing::info!(
            anchor_id = %anchor.id(),
            removed = removed.len(),
            added = added.len(),
            "Synchronised assignments"
        );
        Ok(SyncOutcome { removed, added })
    }

    /// Deletes every link of the anchor.
    pub async fn detach(&self, anchor: Anchor) -> StaffingResult<usize> {
        let outcome = self.sync(anchor, &[]).await?;
        Ok(outcome.removed.len())
    }
}

/// Service layer for Project business logic
pub struct ProjectService<P: ProjectRepository, A: AssignmentRepository> {
    repository: Arc<P>,
    links: AssignmentService<A>,
}

impl<P: ProjectRepository, A: AssignmentRepository> Clone for ProjectService<P, A> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            links: self.links.clone(),
        }
    }
}

impl<P: ProjectRepository, A: AssignmentRepository> ProjectService<P, A> {
    pub fn new(repository: P, links: AssignmentService<A>) -> Self {
        Self {
            repository: Arc::new(repository),
            links,
        }
    }

    /// Stores the project, then assigns `engineer_ids` if given.
    ///
    /// Links need the stored id, so they are written second; a failed link
    /// leaves the project in place.
    pub async fn create(&self, mut input: CreateProject) -> StaffingResult<Project> {
        let members = input.engineer_ids.take();
        let draft = input.into_draft()?;
        let project = self.repository.create(draft).await?;

        if let Some(engineer_ids) = members {
            self.links
                .sync(Anchor::Project(project.id), &engineer_ids)
                .await?;
        }
        Ok(project)
    }

    pub async fn list(&self) -> StaffingResult<Vec<Project>> {
        self.repository.list().await
    }

    /// P1 first; equal priorities keep creation order
    pub async fn list_by_priority(&self) -> StaffingResult<Vec<Project>> {
        let projects = self.repository.list().await?;
        Ok(relations::projects_by_priority(&projects)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> StaffingResult<Project> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(StaffingError::NotFound(Resource::Project, id))
    }

    /// Updates the record, then syncs its engineers when `engineer_ids` is set.
    pub async fn update(&self, mut input: UpdateProject) -> StaffingResult<Project> {
        let members = input.engineer_ids.take();
        let (id, draft) = input.into_parts()?;
        let project = self
            .repository
            .update(id, draft)
            .await?
            .ok_or(StaffingError::NotFound(Resource::Project, id))?;

        if let Some(engineer_ids) = members {
            self.links.sync(Anchor::Project(id), &engineer_ids).await?;
        }
        Ok(project)
    }

    /// Removes the project's links, then the project itself.
    pub async fn delete(&self, id: Uuid) -> StaffingResult<()> {
        self.get(id).await?;

        let detached = self.links.detach(Anchor::Project(id)).await?;
        tracing::debug!(project_id = %id, detached, "Detached project links");

        if !self.repository.delete(id).await? {
            return Err(StaffingError::NotFound(Resource::Project, id));
        }
        Ok(())
    }

    pub async fn assign_engineers(
        &self,
        id: Uuid,
        engineer_ids: &[Uuid],
    ) -> StaffingResult<SyncOutcome> {
        self.get(id).await?;
        self.links.sync(Anchor::Project(id), engineer_ids).await
    }
}

/// Service layer for Engineer business logic
pub struct EngineerService<E: EngineerRepository, A: AssignmentRepository> {
    repository: Arc<E>,
    links: AssignmentService<A>,
}

impl<E: EngineerRepository, A: AssignmentRepository> Clone for EngineerService<E, A> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            links: self.links.clone(),
        }
    }
}

impl<E: EngineerRepository, A: AssignmentRepository> EngineerService<E, A> {
    pub fn new(repository: E, links: AssignmentService<A>) -> Self {
        Self {
            repository: Arc::new(repository),
            links,
        }
    }

    pub async fn create(&self, mut input: CreateEngineer) -> StaffingResult<Engineer> {
        let memberships = input.project_ids.take();
        let draft = input.into_draft()?;
        let engineer = self.repository.create(draft).await?;

        if let Some(project_ids) = memberships {
            self.links
                .sync(Anchor::Engineer(engineer.id), &project_ids)
                .await?;
        }
        Ok(engineer)
    }

    pub async fn list(&self, filter: EngineerFilter) -> StaffingResult<Vec<Engineer>> {
        if filter == EngineerFilter::All {
            return self.repository.list().await;
        }

        let (engineers, assignments) =
            tokio::try_join!(self.repository.list(), self.links.list())?;
        Ok(relations::filtered_engineers(&engineers, &assignments, filter)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn stats(&self) -> StaffingResult<EngineerStats> {
        let (engineers, assignments) =
            tokio::try_join!(self.repository.list(), self.links.list())?;
        Ok(relations::engineer_stats(&engineers, &assignments))
    }

    pub async fn get(&self, id: Uuid) -> StaffingResult<Engineer> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(StaffingError::NotFound(Resource::Engineer, id))
    }

    pub async fn update(&self, mut input: UpdateEngineer) -> StaffingResult<Engineer> {
        let memberships = input.project_ids.take();
        let (id, draft) = input.into_parts()?;
        let engineer = self
            .repository
            .update(id, draft)
            .await?
            .ok_or(StaffingError::NotFound(Resource::Engineer, id))?;

        if let Some(project_ids) = memberships {
            self.links.sync(Anchor::Engineer(id), &project_ids).await?;
        }
        Ok(engineer)
    }

    /// Succeeds whether or not the engineer existed.
    pub async fn delete(&self, id: Uuid) -> StaffingResult<()> {
        let detached = self.links.detach(Anchor::Engineer(id)).await?;
        tracing::debug!(engineer_id = %id, detached, "Detached engineer links");

        if !self.repository.delete(id).await? {
            tracing::debug!(engineer_id = %id, "Engineer already absent");
        }
        Ok(())
    }

    pub async fn assign_projects(
        &self,
        id: Uuid,
        project_ids: &[Uuid],
    ) -> StaffingResult<SyncOutcome> {
        self.get(id).await?;
        self.links.sync(Anchor::Engineer(id), project_ids).await
    }
}

/// Cross-collection reads: derived memberships and the dashboard overview
pub struct DashboardService<P, E, A>
where
    P: ProjectRepository,
    E: EngineerRepository,
    A: AssignmentRepository,
{
    projects: ProjectService<P, A>,
    engineers: EngineerService<E, A>,
    links: AssignmentService<A>,
}

impl<P, E, A> Clone for DashboardService<P, E, A>
where
    P: ProjectRepository,
    E: EngineerRepository,
    A: AssignmentRepository,
{
    fn clone(&self) -> Self {
        Self {
            projects: self.projects.clone(),
            engineers: self.engineers.clone(),
            links: self.links.clone(),
        }
    }
}

impl<P, E, A> DashboardService<P, E, A>
where
    P: ProjectRepository,
    E: EngineerRepository,
    A: AssignmentRepository,
{
    pub fn new(
        projects: ProjectService<P, A>,
        engineers: EngineerService<E, A>,
        links: AssignmentService<A>,
    ) -> Self {
        Self {
            projects,
            engineers,
            links,
        }
    }

    /// Fetches all three collections concurrently.
    pub async fn load_all(&self) -> StaffingResult<Mirror> {
        let (projects, engineers, assignments) = tokio::try_join!(
            self.projects.list(),
            self.engineers.list(EngineerFilter::All),
            self.links.list()
        )?;
        Ok(Mirror::new(projects, engineers, assignments))
    }

    pub async fn engineers_of_project(&self, id: Uuid) -> StaffingResult<Vec<Engineer>> {
        self.projects.get(id).await?;

        let (links, engineers) = tokio::try_join!(
            self.links.list_for(Anchor::Project(id)),
            self.engineers.list(EngineerFilter::All)
        )?;
        Ok(relations::engineers_for_project(id, &links, &engineers)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn projects_of_engineer(&self, id: Uuid) -> StaffingResult<Vec<Project>> {
        self.engineers.get(id).await?;

        let (links, projects) = tokio::try_join!(
            self.links.list_for(Anchor::Engineer(id)),
            self.projects.list()
        )?;
        Ok(relations::projects_for_engineer(id, &links, &projects)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn assign_engineers(
        &self,
        project_id: Uuid,
        engineer_ids: &[Uuid],
    ) -> StaffingResult<SyncOutcome> {
        self.projects.assign_engineers(project_id, engineer_ids).await
    }

    pub async fn assign_projects(
        &self,
        engineer_id: Uuid,
        project_ids: &[Uuid],
    ) -> StaffingResult<SyncOutcome> {
        self.engineers.assign_projects(engineer_id, project_ids).await
    }

    pub async fn overview(&self, filter: EngineerFilter) -> StaffingResult<Overview> {
        let mirror = self.load_all().await?;
        Ok(Overview::from_mirror(&mirror, filter))
    }
}
