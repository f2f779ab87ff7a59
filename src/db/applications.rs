use sea_orm::*;
use uuid::Uuid;

use crate::models::applications::{self, ApplicationStatus};
use crate::models::contracts::{self, DEFAULT_FEE, PaymentStatus};
use crate::models::requirements::{self, RequirementStatus};
use crate::models::users;

/// Insert a new application (always starts out applied).
pub async fn insert_application(
    db: &DatabaseConnection,
    trainer_id: Uuid,
    requirement_id: Uuid,
    cover_letter: Option<String>,
) -> Result<applications::Model, DbErr> {
    let new_application = applications::ActiveModel {
        id: Set(Uuid::new_v4()),
        trainer_id: Set(trainer_id),
        requirement_id: Set(requirement_id),
        status: Set(ApplicationStatus::Applied),
        cover_letter: Set(cover_letter),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_application.insert(db).await
}

/// Fetch a single application by ID.
pub async fn get_application_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<applications::Model>, DbErr> {
    applications::Entity::find_by_id(id).one(db).await
}

/// Fetch a trainer's applications, newest first.
pub async fn get_applications_by_trainer(
    db: &DatabaseConnection,
    trainer_id: Uuid,
) -> Result<Vec<applications::Model>, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::TrainerId.eq(trainer_id))
        .order_by_desc(applications::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch the applications for a requirement, newest first.
pub async fn get_applications_by_requirement(
    db: &DatabaseConnection,
    requirement_id: Uuid,
) -> Result<Vec<applications::Model>, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::RequirementId.eq(requirement_id))
        .order_by_desc(applications::Column::CreatedAt)
        .all(db)
        .await
}

/// Find a trainer's application to a requirement, if any.
pub async fn find_by_trainer_and_requirement(
    db: &DatabaseConnection,
    trainer_id: Uuid,
    requirement_id: Uuid,
) -> Result<Option<applications::Model>, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::TrainerId.eq(trainer_id))
        .filter(applications::Column::RequirementId.eq(requirement_id))
        .one(db)
        .await
}

/// Update an application's status.
pub async fn update_application_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: ApplicationStatus,
) -> Result<applications::Model, DbErr> {
    let application = applications::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Application not found".to_string()))?;

    let mut active: applications::ActiveModel = application.into();
    active.status = Set(status);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Accept an application: mark it accepted, generate the contract, and move
/// the parent requirement to in_progress, all inside one transaction so a
/// crash can never leave an accepted application without its contract.
pub async fn accept_application(
    db: &DatabaseConnection,
    application: applications::Model,
    requirement: requirements::Model,
    college: &users::Model,
) -> Result<contracts::Model, DbErr> {
    let terms = format!(
        "This contract is for the training requirement \"{}\" between {} (College) and the selected trainer. The training will be conducted according to the requirement description and will follow all agreed terms.",
        requirement.title, college.name
    );

    let trainer_id = application.trainer_id;
    let application_id = application.id;
    let requirement_id = requirement.id;

    let txn = db.begin().await?;

    let mut application: applications::ActiveModel = application.into();
    application.status = Set(ApplicationStatus::Accepted);
    application.updated_at = Set(Some(chrono::Utc::now()));
    application.update(&txn).await?;

    let contract = contracts::ActiveModel {
        id: Set(Uuid::new_v4()),
        trainer_id: Set(trainer_id),
        college_id: Set(college.id),
        requirement_id: Set(requirement_id),
        application_id: Set(application_id),
        terms: Set(terms),
        fee: Set(DEFAULT_FEE),
        signed_by_trainer: Set(false),
        signed_by_college: Set(false),
        payment_status: Set(PaymentStatus::Pending),
        trainer_signed_at: Set(None),
        college_signed_at: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(&txn)
    .await?;

    let mut requirement: requirements::ActiveModel = requirement.into();
    requirement.status = Set(RequirementStatus::InProgress);
    requirement.updated_at = Set(Some(chrono::Utc::now()));
    requirement.update(&txn).await?;

    txn.commit().await?;

    Ok(contract)
}

/// Count applications against a requirement.
pub async fn count_by_requirement(
    db: &DatabaseConnection,
    requirement_id: Uuid,
) -> Result<u64, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::RequirementId.eq(requirement_id))
        .count(db)
        .await
}

/// Count all applications.
pub async fn count_all(db: &DatabaseConnection) -> Result<u64, DbErr> {
    applications::Entity::find().count(db).await
}

/// Count accepted applications.
pub async fn count_accepted(db: &DatabaseConnection) -> Result<u64, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::Status.eq(ApplicationStatus::Accepted))
        .count(db)
        .await
}

/// Count applications still awaiting a decision (applied or shortlisted).
pub async fn count_pending(db: &DatabaseConnection) -> Result<u64, DbErr> {
    applications::Entity::find()
        .filter(
            applications::Column::Status
                .is_in([ApplicationStatus::Applied, ApplicationStatus::Shortlisted]),
        )
        .count(db)
        .await
}
