use sea_orm::*;
use uuid::Uuid;

use crate::models::sessions;

/// Insert a new session row; the generated id is the session token.
pub async fn insert_session(
    db: &DatabaseConnection,
    user_id: Uuid,
    expires_at: chrono::DateTime<chrono::Utc>,
) -> Result<sessions::Model, DbErr> {
    let new_session = sessions::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        expires_at: Set(expires_at),
        created_at: Set(chrono::Utc::now()),
    };

    new_session.insert(db).await
}

/// Fetch a session by its token.
pub async fn get_session(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<sessions::Model>, DbErr> {
    sessions::Entity::find_by_id(id).one(db).await
}

/// Delete a session by its token (logout, or lazy expiry cleanup).
pub async fn delete_session(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    sessions::Entity::delete_by_id(id).exec(db).await
}
