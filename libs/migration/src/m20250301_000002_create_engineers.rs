use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Engineers::Table)
                    .if_not_exists()
                    .col(pk_uuid(Engineers::Id))
                    .col(string_len(Engineers::Name, 255))
                    .col(string_len(Engineers::Role, 255))
                    .col(
                        timestamp_with_time_zone(Engineers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Engineers::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Engineers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Engineers {
    Table,
    Id,
    Name,
    Role,
    CreatedAt,
    UpdatedAt,
}
