use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `requirements` table and its columns.
#[derive(DeriveIden)]
enum Requirements {
    Table,
    Id,
    Title,
    Description,
    PostedBy,
    Status,
    Mode,
    SkillsRequired,
    DurationWeeks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Requirements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Requirements::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Requirements::Title).string().not_null())
                    .col(ColumnDef::new(Requirements::Description).text().not_null())
                    .col(ColumnDef::new(Requirements::PostedBy).uuid().not_null())
                    .col(ColumnDef::new(Requirements::Status).string().not_null())
                    .col(ColumnDef::new(Requirements::Mode).string().not_null())
                    .col(ColumnDef::new(Requirements::SkillsRequired).json().not_null())
                    .col(
                        ColumnDef::new(Requirements::DurationWeeks)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Requirements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Requirements::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requirements_posted_by")
                            .from(Requirements::Table, Requirements::PostedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Requirements::Table).to_owned())
            .await
    }
}
