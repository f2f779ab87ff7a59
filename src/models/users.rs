use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The `Role` enum maps to a TEXT column stored as lowercase strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[sea_orm(string_value = "trainer")]
    Trainer,
    #[sea_orm(string_value = "college")]
    College,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Skill tags stored as a JSON array so the column shape matches on both
/// Postgres and SQLite.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct SkillList(pub Vec<String>);

/// SeaORM entity for the `users` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: Role,
    pub verified: bool,
    #[sea_orm(column_type = "Json")]
    pub skills: SkillList,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub organization: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::requirements::Entity")]
    Requirements,
    #[sea_orm(has_many = "super::applications::Entity")]
    Applications,
    #[sea_orm(has_many = "super::sessions::Entity")]
    Sessions,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::requirements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requirements.def()
    }
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs (not stored in DB, used for request/response bodies) ──

/// Validated registration data handed to the db layer; the password has
/// already been hashed by the time this struct exists.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub organization: Option<String>,
}

/// Skills arrive either as an array or as a single bare string; both forms
/// normalize to a plain list before storage.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    Many(Vec<String>),
    One(String),
}

impl SkillsInput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            SkillsInput::Many(skills) => skills,
            SkillsInput::One(skill) => vec![skill],
        }
    }
}

/// Used by the `POST /api/register` endpoint.
///
/// Every field is optional at the serde level so the handler can answer with
/// a per-field "Missing required field" message instead of a decode error.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub skills: Option<SkillsInput>,
    pub bio: Option<String>,
    pub organization: Option<String>,
}

/// Used by the `POST /api/login` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Used by the `PATCH /api/profile/update` endpoint. Only profile fields are
/// writable here; `role` and `verified` stay admin territory.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub organization: Option<String>,
    pub skills: Option<SkillsInput>,
}

/// Body of `PATCH /api/admin/block-user/{user_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockUser {
    pub blocked: bool,
}

/// A safe user representation for API responses (never leaks the password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub verified: bool,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub organization: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl From<Model> for UserResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            name: m.name,
            email: m.email,
            role: m.role,
            verified: m.verified,
            skills: m.skills.0,
            bio: m.bio,
            organization: m.organization,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
