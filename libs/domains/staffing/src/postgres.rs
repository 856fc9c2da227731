use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity::{assignment, engineer, project},
    error::{StaffingError, StaffingResult},
    models::{Assignment, Engineer, EngineerDraft, NewAssignment, Project, ProjectDraft},
    reconcile::Anchor,
    repository::{AssignmentRepository, DANGLING_LINK, EngineerRepository, ProjectRepository},
};

pub struct PgProjectRepository {
    db: DatabaseConnection,
}

impl PgProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn list(&self) -> StaffingResult<Vec<Project>> {
        let models = project::Entity::find()
            .order_by_asc(project::Column::CreatedAt)
            .order_by_asc(project::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> StaffingResult<Option<Project>> {
        let model = project::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, draft: ProjectDraft) -> StaffingResult<Project> {
        let now = Utc::now();
        let active_model = project::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(draft.name),
            status: Set(draft.status),
            priority: Set(draft.priority),
            description: Set(draft.description),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = active_model.insert(&self.db).await?;

        tracing::info!(project_id = %model.id, "Created project");
        Ok(model.into())
    }

    async fn update(&self, id: Uuid, draft: ProjectDraft) -> StaffingResult<Option<Project>> {
        let Some(model) = project::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active_model: project::ActiveModel = model.into();
        active_model.name = Set(draft.name);
        active_model.status = Set(draft.status);
        active_model.priority = Set(draft.priority);
        active_model.description = Set(draft.description);
        active_model.updated_at = Set(Utc::now().into());

        let updated = active_model.update(&self.db).await?;

        tracing::info!(project_id = %id, "Updated project");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: Uuid) -> StaffingResult<bool> {
        let result = project::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(project_id = %id, "Deleted project");
        }
        Ok(result.rows_affected > 0)
    }
}

pub struct PgEngineerRepository {
    db: DatabaseConnection,
}

impl PgEngineerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EngineerRepository for PgEngineerRepository {
    async fn list(&self) -> StaffingResult<Vec<Engineer>> {
        let models = engineer::Entity::find()
            .order_by_asc(engineer::Column::CreatedAt)
            .order_by_asc(engineer::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> StaffingResult<Option<Engineer>> {
        let model = engineer::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, draft: EngineerDraft) -> StaffingResult<Engineer> {
        let now = Utc::now();
        let model = engineer::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(draft.name),
            role: Set(draft.role),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(engineer_id = %model.id, "Created engineer");
        Ok(model.into())
    }

    async fn update(&self, id: Uuid, draft: EngineerDraft) -> StaffingResult<Option<Engineer>> {
        let Some(model) = engineer::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active_model: engineer::ActiveModel = model.into();
        active_model.name = Set(draft.name);
        active_model.role = Set(draft.role);
        active_model.updated_at = Set(Utc::now().into());

        let updated = active_model.update(&self.db).await?;

        tracing::info!(engineer_id = %id, "Updated engineer");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: Uuid) -> StaffingResult<bool> {
        let result = engineer::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(engineer_id = %id, "Deleted engineer");
        }
        Ok(result.rows_affected > 0)
    }
}

pub struct PgAssignmentRepository {
    db: DatabaseConnection,
}

impl PgAssignmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// A link to a missing row is the caller's mistake, not a server failure.
fn map_link_error(err: DbErr) -> StaffingError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::info!(detail = %detail, "Rejected dangling assignment");
            StaffingError::validation(DANGLING_LINK)
        }
        _ => StaffingError::Database(err),
    }
}

#[async_trait]
impl AssignmentRepository for PgAssignmentRepository {
    async fn list(&self) -> StaffingResult<Vec<Assignment>> {
        let models = assignment::Entity::find()
            .order_by_asc(assignment::Column::CreatedAt)
            .order_by_asc(assignment::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_for(&self, anchor: Anchor) -> StaffingResult<Vec<Assignment>> {
        let column = match anchor {
            Anchor::Project(_) => assignment::Column::ProjectId,
            Anchor::Engineer(_) => assignment::Column::EngineerId,
        };

        let models = assignment::Entity::find()
            .filter(column.eq(anchor.id()))
            .order_by_asc(assignment::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn create(&self, link: NewAssignment) -> StaffingResult<Assignment> {
        let model = assignment::ActiveModel {
            id: Set(Uuid::now_v7()),
            project_id: Set(link.project_id),
            engineer_id: Set(link.engineer_id),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(map_link_error)?;

        tracing::info!(
            assignment_id = %model.id,
            project_id = %model.project_id,
            engineer_id = %model.engineer_id,
            "Created assignment"
        );
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> StaffingResult<bool> {
        let result = assignment::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(assignment_id = %id, "Deleted assignment");
        }
        Ok(result.rows_affected > 0)
    }
}
