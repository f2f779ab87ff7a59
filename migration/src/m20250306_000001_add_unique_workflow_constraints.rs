use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Applications {
    Table,
    TrainerId,
    RequirementId,
}

#[derive(DeriveIden)]
enum Contracts {
    Table,
    ApplicationId,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    GivenBy,
    GivenTo,
    RequirementId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One application per trainer per requirement. The handlers pre-check
        // and return a friendly 400; this closes the race between two
        // concurrent applies.
        manager
            .create_index(
                Index::create()
                    .name("idx_applications_trainer_requirement_unique")
                    .table(Applications::Table)
                    .col(Applications::TrainerId)
                    .col(Applications::RequirementId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // One contract per accepted application.
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_application_unique")
                    .table(Contracts::Table)
                    .col(Contracts::ApplicationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // One review per (reviewer, receiver, requirement) triple.
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_giver_receiver_requirement_unique")
                    .table(Reviews::Table)
                    .col(Reviews::GivenBy)
                    .col(Reviews::GivenTo)
                    .col(Reviews::RequirementId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_applications_trainer_requirement_unique")
                    .table(Applications::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_contracts_application_unique")
                    .table(Contracts::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_reviews_giver_receiver_requirement_unique")
                    .table(Reviews::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
