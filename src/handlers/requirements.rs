use actix_web::{HttpResponse, Responder, web};
use sea_orm::{DatabaseConnection, DbErr};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::auth::authorization::{require_role, verify_requirement_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::applications as application_db;
use crate::db::requirements as requirement_db;
use crate::db::users as user_db;
use crate::models::requirements::{
    self, CreateRequirement, PosterInfo, RequirementStatus, RequirementWithPoster,
    UpdateRequirementStatus,
};
use crate::models::users::Role;

/// Attach each requirement's posting college, fetched in one batch query.
async fn attach_posters(
    db: &DatabaseConnection,
    requirements: Vec<requirements::Model>,
) -> Result<Vec<RequirementWithPoster>, DbErr> {
    let poster_ids: Vec<Uuid> = requirements
        .iter()
        .map(|r| r.posted_by)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let posters: HashMap<Uuid, PosterInfo> = user_db::get_users_by_ids(db, poster_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, PosterInfo::from(u)))
        .collect();

    Ok(requirements
        .into_iter()
        .map(|r| {
            let poster = posters.get(&r.posted_by).cloned();
            RequirementWithPoster {
                requirement: r,
                poster,
            }
        })
        .collect())
}

/// POST /api/requirements — a college posts a new training requirement.
pub async fn create_requirement(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateRequirement>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::College) {
        return resp;
    }

    match requirement_db::insert_requirement(db.get_ref(), body.into_inner(), user.0.id).await {
        Ok(requirement) => HttpResponse::Created().json(requirement),
        Err(e) => {
            tracing::error!("Failed to create requirement: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to create training requirement",
            }))
        }
    }
}

/// GET /api/requirements — role-scoped listing: trainers see open postings,
/// colleges see their own, admins see everything.
pub async fn get_requirements(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    let result = match user.0.role {
        Role::Trainer => requirement_db::get_open_requirements(db.get_ref()).await,
        Role::College => requirement_db::get_requirements_by_college(db.get_ref(), user.0.id).await,
        Role::Admin => requirement_db::get_all_requirements(db.get_ref()).await,
    };

    let listed = match result {
        Ok(listed) => listed,
        Err(e) => {
            tracing::error!("Failed to fetch requirements: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch requirements",
            }));
        }
    };

    match attach_posters(db.get_ref(), listed).await {
        Ok(enriched) => HttpResponse::Ok().json(enriched),
        Err(e) => {
            tracing::error!("Failed to fetch requirement posters: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch requirements",
            }))
        }
    }
}

/// GET /api/requirements/{id} — fetch one requirement with its poster.
pub async fn get_requirement(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let requirement = match requirement_db::get_requirement_by_id(db.get_ref(), path.into_inner())
        .await
    {
        Ok(Some(requirement)) => requirement,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "message": "Requirement not found",
            }));
        }
        Err(e) => {
            tracing::error!("Failed to fetch requirement: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch requirement",
            }));
        }
    };

    let poster = match user_db::get_user_by_id(db.get_ref(), requirement.posted_by).await {
        Ok(poster) => poster.map(PosterInfo::from),
        Err(e) => {
            tracing::error!("Failed to fetch requirement poster: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch requirement",
            }));
        }
    };

    HttpResponse::Ok().json(RequirementWithPoster {
        requirement,
        poster,
    })
}

/// PATCH /api/requirements/{id} — move a requirement forward through its
/// lifecycle. Backward and same-status transitions are rejected.
pub async fn update_requirement_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateRequirementStatus>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::College) {
        return resp;
    }

    let requirement_id = path.into_inner();
    let requirement = match verify_requirement_owner(
        db.get_ref(),
        requirement_id,
        user.0.id,
        "You can only update your own requirements",
    )
    .await
    {
        Ok(requirement) => requirement,
        Err(resp) => return resp,
    };

    let status = body.into_inner().status;
    if status.stage() <= requirement.status.stage() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Invalid status transition",
        }));
    }

    match requirement_db::update_requirement_status(db.get_ref(), requirement_id, status).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Status updated successfully",
        })),
        Err(e) => {
            tracing::error!("Failed to update requirement status: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to update status",
            }))
        }
    }
}

/// DELETE /api/requirements/{id} — only open requirements with no
/// applications can be removed.
pub async fn delete_requirement(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::College) {
        return resp;
    }

    let requirement_id = path.into_inner();
    let requirement = match verify_requirement_owner(
        db.get_ref(),
        requirement_id,
        user.0.id,
        "You can only delete your own requirements",
    )
    .await
    {
        Ok(requirement) => requirement,
        Err(resp) => return resp,
    };

    if requirement.status != RequirementStatus::Open {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Cannot delete a requirement that is no longer open",
        }));
    }

    match application_db::count_by_requirement(db.get_ref(), requirement_id).await {
        Ok(0) => {}
        Ok(_) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Cannot delete requirement with existing applications",
            }));
        }
        Err(e) => {
            tracing::error!("Failed to count applications: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to delete requirement",
            }));
        }
    }

    match requirement_db::delete_requirement(db.get_ref(), requirement_id).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Requirement deleted successfully",
        })),
        Err(e) => {
            tracing::error!("Failed to delete requirement: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to delete requirement",
            }))
        }
    }
}
