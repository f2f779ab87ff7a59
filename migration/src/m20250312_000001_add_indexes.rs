use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Requirements {
    Table,
    PostedBy,
    Status,
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    TrainerId,
    RequirementId,
}

#[derive(DeriveIden)]
enum Contracts {
    Table,
    TrainerId,
    CollegeId,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    GivenTo,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    UserId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on requirements.posted_by for a college's own listings
        manager
            .create_index(
                Index::create()
                    .name("idx_requirements_posted_by")
                    .table(Requirements::Table)
                    .col(Requirements::PostedBy)
                    .to_owned(),
            )
            .await?;

        // Index on requirements.status for the open-requirements feed
        manager
            .create_index(
                Index::create()
                    .name("idx_requirements_status")
                    .table(Requirements::Table)
                    .col(Requirements::Status)
                    .to_owned(),
            )
            .await?;

        // Index on applications.trainer_id for a trainer's own applications
        manager
            .create_index(
                Index::create()
                    .name("idx_applications_trainer_id")
                    .table(Applications::Table)
                    .col(Applications::TrainerId)
                    .to_owned(),
            )
            .await?;

        // Index on applications.requirement_id for per-requirement listings
        manager
            .create_index(
                Index::create()
                    .name("idx_applications_requirement_id")
                    .table(Applications::Table)
                    .col(Applications::RequirementId)
                    .to_owned(),
            )
            .await?;

        // Indexes on contracts for both parties' contract lists
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_trainer_id")
                    .table(Contracts::Table)
                    .col(Contracts::TrainerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_college_id")
                    .table(Contracts::Table)
                    .col(Contracts::CollegeId)
                    .to_owned(),
            )
            .await?;

        // Index on reviews.given_to for received-review lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_given_to")
                    .table(Reviews::Table)
                    .col(Reviews::GivenTo)
                    .to_owned(),
            )
            .await?;

        // Index on notifications.user_id for the notification feed
        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_id")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_requirements_posted_by").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_requirements_status").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_applications_trainer_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_applications_requirement_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contracts_trainer_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contracts_college_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reviews_given_to").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_notifications_user_id").to_owned())
            .await?;

        Ok(())
    }
}
