use actix_web::HttpResponse;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::requirements as requirement_db;
use crate::models::requirements;
use crate::models::users::{self, Role};

pub fn require_role(user: &users::Model, role: Role) -> Result<(), HttpResponse> {
    if user.role == role {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(serde_json::json!({
            "message": "Forbidden",
        })))
    }
}

pub async fn verify_requirement_owner(
    db: &DatabaseConnection,
    requirement_id: Uuid,
    user_id: Uuid,
    denial: &str,
) -> Result<requirements::Model, HttpResponse> {
    let requirement = requirement_db::get_requirement_by_id(db, requirement_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch requirement {requirement_id}: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch requirement",
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "message": "Requirement not found",
            }))
        })?;

    if requirement.posted_by != user_id {
        return Err(HttpResponse::Forbidden().json(serde_json::json!({
            "message": denial,
        })));
    }

    Ok(requirement)
}
