use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::notifications as notification_db;

/// GET /api/notifications — the caller's notifications, newest first.
pub async fn get_notifications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match notification_db::get_notifications_for_user(db.get_ref(), user.0.id).await {
        Ok(listed) => HttpResponse::Ok().json(listed),
        Err(e) => {
            tracing::error!("Failed to fetch notifications: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch notifications",
            }))
        }
    }
}

/// PATCH /api/notifications/{id} — mark one of the caller's own
/// notifications as read. Someone else's notification looks like a 404.
pub async fn mark_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let notification =
        match notification_db::get_notification_for_user(db.get_ref(), path.into_inner(), user.0.id)
            .await
        {
            Ok(Some(notification)) => notification,
            Ok(None) => {
                return HttpResponse::NotFound().json(serde_json::json!({
                    "message": "Notification not found",
                }));
            }
            Err(e) => {
                tracing::error!("Failed to fetch notification: {e}");
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Failed to update notification",
                }));
            }
        };

    match notification_db::mark_as_read(db.get_ref(), notification.id).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Notification marked as read",
        })),
        Err(e) => {
            tracing::error!("Failed to mark notification as read: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to update notification",
            }))
        }
    }
}
