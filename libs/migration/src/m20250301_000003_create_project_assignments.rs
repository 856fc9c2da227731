use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_projects::Projects;
use crate::m20250301_000002_create_engineers::Engineers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No unique (project_id, engineer_id): duplicate links are tolerated
        manager
            .create_table(
                Table::create()
                    .table(ProjectAssignments::Table)
                    .if_not_exists()
                    .col(pk_uuid(ProjectAssignments::Id))
                    .col(uuid(ProjectAssignments::ProjectId))
                    .col(uuid(ProjectAssignments::EngineerId))
                    .col(
                        timestamp_with_time_zone(ProjectAssignments::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_assignments_project_id")
                            .from(ProjectAssignments::Table, ProjectAssignments::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_assignments_engineer_id")
                            .from(ProjectAssignments::Table, ProjectAssignments::EngineerId)
                            .to(Engineers::Table, Engineers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_assignments_project_id")
                    .table(ProjectAssignments::Table)
                    .col(ProjectAssignments::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_assignments_engineer_id")
                    .table(ProjectAssignments::Table)
                    .col(ProjectAssignments::EngineerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectAssignments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProjectAssignments {
    Table,
    Id,
    ProjectId,
    EngineerId,
    CreatedAt,
}
