use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::users::{SkillList, SkillsInput};

/// Lifecycle of a training requirement. The status only ever moves forward:
/// open -> in_progress -> completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum RequirementStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl RequirementStatus {
    /// Position in the lifecycle, used to reject backward transitions.
    pub fn stage(&self) -> u8 {
        match self {
            RequirementStatus::Open => 0,
            RequirementStatus::InProgress => 1,
            RequirementStatus::Completed => 2,
        }
    }
}

/// SeaORM entity for the `requirements` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requirements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub posted_by: Uuid,
    pub status: RequirementStatus,
    pub mode: String,
    #[sea_orm(column_type = "Json")]
    pub skills_required: SkillList,
    pub duration_weeks: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PostedBy",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::applications::Entity")]
    Applications,
    #[sea_orm(has_many = "super::contracts::Entity")]
    Contracts,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequirement {
    pub title: String,
    pub description: String,
    pub mode: String,
    pub skills_required: Option<SkillsInput>,
    pub duration_weeks: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequirementStatus {
    pub status: RequirementStatus,
}

/// Compact poster info embedded in requirement responses.
#[derive(Debug, Clone, Serialize)]
pub struct PosterInfo {
    pub id: Uuid,
    pub name: String,
    pub organization: Option<String>,
}

impl From<super::users::Model> for PosterInfo {
    fn from(u: super::users::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
            organization: u.organization,
        }
    }
}

/// A requirement together with its poster, as returned by the list and
/// detail endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementWithPoster {
    #[serde(flatten)]
    pub requirement: Model,
    pub poster: Option<PosterInfo>,
}
