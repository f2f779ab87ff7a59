use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::users::Role;

/// SeaORM entity for the `reviews` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub given_by: Uuid,
    pub given_to: Uuid,
    pub requirement_id: Uuid,
    pub rating: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::requirements::Entity",
        from = "Column::RequirementId",
        to = "super::requirements::Column::Id"
    )]
    Requirement,
}

impl Related<super::requirements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requirement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of `POST /api/review`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub given_to: Uuid,
    pub requirement_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Compact requirement info embedded in review responses.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementBrief {
    pub id: Uuid,
    pub title: String,
}

/// Compact reviewer info embedded in review responses.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewerInfo {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

/// A review with its requirement and reviewer, as returned by
/// `GET /api/reviews/{user_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewWithContext {
    #[serde(flatten)]
    pub review: Model,
    pub requirement: Option<RequirementBrief>,
    pub reviewer: Option<ReviewerInfo>,
}
