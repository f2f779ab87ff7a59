use sea_orm::*;
use uuid::Uuid;

use crate::models::users::{self, NewUser, Role, SkillList, UpdateProfile};

/// Insert a new user (password already hashed by the caller).
pub async fn insert_user(db: &DatabaseConnection, input: NewUser) -> Result<users::Model, DbErr> {
    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(input.username),
        password_hash: Set(input.password_hash),
        name: Set(input.name),
        email: Set(input.email),
        role: Set(input.role),
        verified: Set(false),
        skills: Set(SkillList(input.skills)),
        bio: Set(input.bio),
        organization: Set(input.organization),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_user.insert(db).await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Fetch a single user by username.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await
}

/// Fetch a single user by email.
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
}

/// Fetch all users with a given role.
pub async fn get_users_by_role(
    db: &DatabaseConnection,
    role: Role,
) -> Result<Vec<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Role.eq(role))
        .all(db)
        .await
}

/// Fetch many users by ID in one query.
pub async fn get_users_by_ids(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> Result<Vec<users::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    users::Entity::find()
        .filter(users::Column::Id.is_in(ids))
        .all(db)
        .await
}

/// Update a user's own profile fields.
pub async fn update_profile(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProfile,
) -> Result<users::Model, DbErr> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(email) = input.email {
        active.email = Set(email);
    }
    if let Some(bio) = input.bio {
        active.bio = Set(Some(bio));
    }
    if let Some(organization) = input.organization {
        active.organization = Set(Some(organization));
    }
    if let Some(skills) = input.skills {
        active.skills = Set(SkillList(skills.into_vec()));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Flip a user's verified flag (admin approval and block/unblock both land here).
pub async fn set_verified(
    db: &DatabaseConnection,
    id: Uuid,
    verified: bool,
) -> Result<users::Model, DbErr> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();
    active.verified = Set(verified);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Count users with a given role.
pub async fn count_by_role(db: &DatabaseConnection, role: Role) -> Result<u64, DbErr> {
    users::Entity::find()
        .filter(users::Column::Role.eq(role))
        .count(db)
        .await
}

/// Count all users.
pub async fn count_all(db: &DatabaseConnection) -> Result<u64, DbErr> {
    users::Entity::find().count(db).await
}
