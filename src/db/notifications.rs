use sea_orm::*;
use uuid::Uuid;

use crate::models::notifications;

/// Insert a new notification.
pub async fn insert_notification(
    db: &DatabaseConnection,
    user_id: Uuid,
    message: String,
    related_entity_type: Option<&str>,
    related_entity_id: Option<Uuid>,
) -> Result<notifications::Model, DbErr> {
    let new_notification = notifications::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        message: Set(message),
        read: Set(false),
        related_entity_type: Set(related_entity_type.map(str::to_string)),
        related_entity_id: Set(related_entity_id),
        created_at: Set(chrono::Utc::now()),
    };

    new_notification.insert(db).await
}

/// Best-effort notification write: the business operation that triggered it
/// has already committed, so a failure here is logged and swallowed rather
/// than surfaced to the client.
pub async fn notify(
    db: &DatabaseConnection,
    user_id: Uuid,
    message: String,
    related_entity_type: Option<&str>,
    related_entity_id: Option<Uuid>,
) {
    if let Err(err) =
        insert_notification(db, user_id, message, related_entity_type, related_entity_id).await
    {
        tracing::warn!("Failed to create notification for user {user_id}: {err}");
    }
}

/// Fetch a user's notifications, newest first.
pub async fn get_notifications_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<notifications::Model>, DbErr> {
    notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .order_by_desc(notifications::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch one notification, scoped to its owner so the ownership check and
/// the lookup are a single query.
pub async fn get_notification_for_user(
    db: &DatabaseConnection,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<notifications::Model>, DbErr> {
    notifications::Entity::find_by_id(id)
        .filter(notifications::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Mark a notification as read.
pub async fn mark_as_read(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<notifications::Model, DbErr> {
    let notification = notifications::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Notification not found".to_string()))?;

    let mut active: notifications::ActiveModel = notification.into();
    active.read = Set(true);

    active.update(db).await
}
