use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `applications` table and its columns.
#[derive(DeriveIden)]
enum Applications {
    Table,
    Id,
    TrainerId,
    RequirementId,
    Status,
    CoverLetter,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Requirements {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Applications::TrainerId).uuid().not_null())
                    .col(ColumnDef::new(Applications::RequirementId).uuid().not_null())
                    .col(ColumnDef::new(Applications::Status).string().not_null())
                    .col(ColumnDef::new(Applications::CoverLetter).text())
                    .col(
                        ColumnDef::new(Applications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_trainer_id")
                            .from(Applications::Table, Applications::TrainerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_requirement_id")
                            .from(Applications::Table, Applications::RequirementId)
                            .to(Requirements::Table, Requirements::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await
    }
}
