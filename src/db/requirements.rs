use sea_orm::*;
use uuid::Uuid;

use crate::models::requirements::{self, CreateRequirement, RequirementStatus};
use crate::models::users::SkillList;

/// Insert a new requirement (always starts out open).
pub async fn insert_requirement(
    db: &DatabaseConnection,
    input: CreateRequirement,
    posted_by: Uuid,
) -> Result<requirements::Model, DbErr> {
    let skills = input
        .skills_required
        .map(|s| s.into_vec())
        .unwrap_or_default();

    let new_requirement = requirements::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        posted_by: Set(posted_by),
        status: Set(RequirementStatus::Open),
        mode: Set(input.mode),
        skills_required: Set(SkillList(skills)),
        duration_weeks: Set(input.duration_weeks),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_requirement.insert(db).await
}

/// Fetch a single requirement by ID.
pub async fn get_requirement_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<requirements::Model>, DbErr> {
    requirements::Entity::find_by_id(id).one(db).await
}

/// Fetch all requirements, newest first (admin view).
pub async fn get_all_requirements(
    db: &DatabaseConnection,
) -> Result<Vec<requirements::Model>, DbErr> {
    requirements::Entity::find()
        .order_by_desc(requirements::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch open requirements, newest first (trainer view).
pub async fn get_open_requirements(
    db: &DatabaseConnection,
) -> Result<Vec<requirements::Model>, DbErr> {
    requirements::Entity::find()
        .filter(requirements::Column::Status.eq(RequirementStatus::Open))
        .order_by_desc(requirements::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a batch of requirements by ID, for embedding into application and
/// contract responses.
pub async fn get_requirements_by_ids(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> Result<Vec<requirements::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    requirements::Entity::find()
        .filter(requirements::Column::Id.is_in(ids))
        .all(db)
        .await
}

/// Find a requirement by exact title (used by the seeder to stay idempotent).
pub async fn find_by_title(
    db: &DatabaseConnection,
    title: &str,
) -> Result<Option<requirements::Model>, DbErr> {
    requirements::Entity::find()
        .filter(requirements::Column::Title.eq(title))
        .one(db)
        .await
}

/// Fetch the requirements posted by one college, newest first.
pub async fn get_requirements_by_college(
    db: &DatabaseConnection,
    college_id: Uuid,
) -> Result<Vec<requirements::Model>, DbErr> {
    requirements::Entity::find()
        .filter(requirements::Column::PostedBy.eq(college_id))
        .order_by_desc(requirements::Column::CreatedAt)
        .all(db)
        .await
}

/// Update a requirement's status.
pub async fn update_requirement_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: RequirementStatus,
) -> Result<requirements::Model, DbErr> {
    let requirement = requirements::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Requirement not found".to_string()))?;

    let mut active: requirements::ActiveModel = requirement.into();
    active.status = Set(status);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a requirement by ID.
pub async fn delete_requirement(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    requirements::Entity::delete_by_id(id).exec(db).await
}

/// Count requirements with a given status.
pub async fn count_by_status(
    db: &DatabaseConnection,
    status: RequirementStatus,
) -> Result<u64, DbErr> {
    requirements::Entity::find()
        .filter(requirements::Column::Status.eq(status))
        .count(db)
        .await
}
