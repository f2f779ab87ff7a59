use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of an application. `applied` can move to `shortlisted`,
/// `accepted` or `rejected`; `shortlisted` to `accepted` or `rejected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "applied")]
    Applied,
    #[sea_orm(string_value = "shortlisted")]
    Shortlisted,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// SeaORM entity for the `applications` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub requirement_id: Uuid,
    pub status: ApplicationStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub cover_letter: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TrainerId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::requirements::Entity",
        from = "Column::RequirementId",
        to = "super::requirements::Column::Id"
    )]
    Requirement,
    #[sea_orm(has_many = "super::contracts::Entity")]
    Contracts,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::requirements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requirement.def()
    }
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of `POST /api/apply/{requirement_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyRequest {
    pub cover_letter: Option<String>,
}

/// Body of the shortlist and accept endpoints; the client sends camelCase.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationAction {
    #[serde(rename = "applicationId")]
    pub application_id: Uuid,
}

/// Trainer info embedded when a college lists applications for its own
/// requirement.
#[derive(Debug, Clone, Serialize)]
pub struct TrainerProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub skills: Vec<String>,
}

impl From<super::users::Model> for TrainerProfile {
    fn from(u: super::users::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            bio: u.bio,
            skills: u.skills.0,
        }
    }
}

/// An application enriched with its requirement and the posting college,
/// as returned by `GET /api/my-applications`.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithRequirement {
    #[serde(flatten)]
    pub application: Model,
    pub requirement: Option<super::requirements::Model>,
    pub college: Option<super::requirements::PosterInfo>,
}

/// An application enriched with its trainer, as returned by
/// `GET /api/requirements/{id}/applications`.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithTrainer {
    #[serde(flatten)]
    pub application: Model,
    pub trainer: Option<TrainerProfile>,
}
