use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `contracts` table and its columns.
#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
    TrainerId,
    CollegeId,
    RequirementId,
    ApplicationId,
    Terms,
    Fee,
    SignedByTrainer,
    SignedByCollege,
    PaymentStatus,
    TrainerSignedAt,
    CollegeSignedAt,
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

#[derive(DeriveIden)]
enum Applications {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contracts::TrainerId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::CollegeId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::RequirementId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::ApplicationId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::Terms).text().not_null())
                    .col(ColumnDef::new(Contracts::Fee).integer().not_null())
                    .col(
                        ColumnDef::new(Contracts::SignedByTrainer)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contracts::SignedByCollege)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contracts::PaymentStatus).string().not_null())
                    .col(ColumnDef::new(Contracts::TrainerSignedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Contracts::CollegeSignedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Contracts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contracts::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_trainer_id")
                            .from(Contracts::Table, Contracts::TrainerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_college_id")
                            .from(Contracts::Table, Contracts::CollegeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_requirement_id")
                            .from(Contracts::Table, Contracts::RequirementId)
                            .to(Requirements::Table, Requirements::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_application_id")
                            .from(Contracts::Table, Contracts::ApplicationId)
                            .to(Applications::Table, Applications::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await
    }
}
