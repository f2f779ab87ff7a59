use actix_web::{HttpResponse, Responder, web};
use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::auth::authorization::require_role;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::applications as application_db;
use crate::db::contracts as contract_db;
use crate::db::notifications as notification_db;
use crate::db::requirements as requirement_db;
use crate::db::users as user_db;
use crate::models::requirements::RequirementStatus;
use crate::models::users::{BlockUser, Role, UserResponse};

/// GET /api/admin/trainers — every trainer account.
pub async fn get_trainers(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::Admin) {
        return resp;
    }

    match user_db::get_users_by_role(db.get_ref(), Role::Trainer).await {
        Ok(listed) => HttpResponse::Ok().json(
            listed
                .into_iter()
                .map(UserResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => {
            tracing::error!("Failed to fetch trainers: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch trainers",
            }))
        }
    }
}

/// GET /api/admin/colleges — every college account.
pub async fn get_colleges(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::Admin) {
        return resp;
    }

    match user_db::get_users_by_role(db.get_ref(), Role::College).await {
        Ok(listed) => HttpResponse::Ok().json(
            listed
                .into_iter()
                .map(UserResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => {
            tracing::error!("Failed to fetch colleges: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch colleges",
            }))
        }
    }
}

/// PATCH /api/admin/approve-trainer/{trainer_id} — verify a trainer account
/// and let them know.
pub async fn approve_trainer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::Admin) {
        return resp;
    }

    let trainer = match user_db::get_user_by_id(db.get_ref(), path.into_inner()).await {
        Ok(Some(trainer)) => trainer,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "message": "Trainer not found",
            }));
        }
        Err(e) => {
            tracing::error!("Failed to fetch trainer: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to approve trainer",
            }));
        }
    };

    if trainer.role != Role::Trainer {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "User is not a trainer",
        }));
    }

    if let Err(e) = user_db::set_verified(db.get_ref(), trainer.id, true).await {
        tracing::error!("Failed to approve trainer: {e}");
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "message": "Failed to approve trainer",
        }));
    }

    notification_db::notify(
        db.get_ref(),
        trainer.id,
        "Your profile has been approved by admin. You can now apply to training requirements."
            .to_string(),
        Some("profile_approval"),
        None,
    )
    .await;

    HttpResponse::Ok().json(serde_json::json!({
        "message": "Trainer approved successfully",
    }))
}

/// PATCH /api/admin/block-user/{user_id} — block or unblock any account by
/// flipping its verified flag.
pub async fn block_user(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<BlockUser>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::Admin) {
        return resp;
    }

    let blocked = body.into_inner().blocked;

    let target = match user_db::get_user_by_id(db.get_ref(), path.into_inner()).await {
        Ok(Some(target)) => target,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "message": "User not found",
            }));
        }
        Err(e) => {
            tracing::error!("Failed to fetch user: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to update user",
            }));
        }
    };

    if let Err(e) = user_db::set_verified(db.get_ref(), target.id, !blocked).await {
        tracing::error!("Failed to update user: {e}");
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "message": "Failed to update user",
        }));
    }

    let notice = if blocked {
        "Your account has been blocked by admin."
    } else {
        "Your account has been unblocked by admin."
    };
    notification_db::notify(
        db.get_ref(),
        target.id,
        notice.to_string(),
        Some("account_status"),
        None,
    )
    .await;

    let outcome = if blocked {
        "User blocked successfully"
    } else {
        "User unblocked successfully"
    };
    HttpResponse::Ok().json(serde_json::json!({
        "message": outcome,
    }))
}

/// Gather all the platform counts in one place so the handler has a single
/// error path.
async fn collect_statistics(db: &DatabaseConnection) -> Result<serde_json::Value, DbErr> {
    let trainers = user_db::count_by_role(db, Role::Trainer).await?;
    let colleges = user_db::count_by_role(db, Role::College).await?;
    let total_users = user_db::count_all(db).await?;

    let open = requirement_db::count_by_status(db, RequirementStatus::Open).await?;
    let in_progress = requirement_db::count_by_status(db, RequirementStatus::InProgress).await?;
    let completed = requirement_db::count_by_status(db, RequirementStatus::Completed).await?;

    let total_applications = application_db::count_all(db).await?;
    let accepted_applications = application_db::count_accepted(db).await?;
    let pending_applications = application_db::count_pending(db).await?;

    let total_contracts = contract_db::count_all(db).await?;
    let signed_contracts = contract_db::count_fully_signed(db).await?;
    let paid_contracts = contract_db::count_paid(db).await?;

    Ok(serde_json::json!({
        "users": {
            "trainers": trainers,
            "colleges": colleges,
            "total": total_users,
        },
        "requirements": {
            "open": open,
            "inProgress": in_progress,
            "completed": completed,
            "total": open + in_progress + completed,
        },
        "applications": {
            "total": total_applications,
            "accepted": accepted_applications,
            "pending": pending_applications,
        },
        "contracts": {
            "total": total_contracts,
            "signed": signed_contracts,
            "paid": paid_contracts,
        },
    }))
}

/// GET /api/admin/statistics — platform-wide counters for the dashboard.
pub async fn statistics(user: AuthenticatedUser, db: web::Data<DatabaseConnection>) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::Admin) {
        return resp;
    }

    match collect_statistics(db.get_ref()).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            tracing::error!("Failed to gather statistics: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch statistics",
            }))
        }
    }
}
