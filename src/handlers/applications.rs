use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::auth::authorization::{require_role, verify_requirement_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::applications as application_db;
use crate::db::notifications as notification_db;
use crate::db::requirements as requirement_db;
use crate::db::users as user_db;
use crate::models::applications::{
    ApplicationAction, ApplicationStatus, ApplicationWithRequirement, ApplicationWithTrainer,
    ApplyRequest, TrainerProfile,
};
use crate::models::requirements::{PosterInfo, RequirementStatus};
use crate::models::users::Role;

/// POST /api/apply/{requirement_id} — a trainer applies to an open
/// requirement. One application per trainer per requirement.
pub async fn apply(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<ApplyRequest>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::Trainer) {
        return resp;
    }

    let requirement_id = path.into_inner();

    // 1. The requirement must exist and still be open.
    let requirement = match requirement_db::get_requirement_by_id(db.get_ref(), requirement_id)
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
                "message": "Failed to submit application",
            }));
        }
    };

    if requirement.status != RequirementStatus::Open {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "This training requirement is not open for applications",
        }));
    }

    // 2. Repeat applications are rejected.
    match application_db::find_by_trainer_and_requirement(db.get_ref(), user.0.id, requirement_id)
        .await
    {
        Ok(Some(_)) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "message": "You have already applied to this requirement",
            }));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to check for existing application: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to submit application",
            }));
        }
    }

    // 3. Create the application and tell the college.
    let application = match application_db::insert_application(
        db.get_ref(),
        user.0.id,
        requirement_id,
        body.into_inner().cover_letter,
    )
    .await
    {
        Ok(application) => application,
        Err(e) => {
            tracing::error!("Failed to create application: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to submit application",
            }));
        }
    };

    notification_db::notify(
        db.get_ref(),
        requirement.posted_by,
        format!("New application received for \"{}\"", requirement.title),
        Some("application"),
        Some(application.id),
    )
    .await;

    HttpResponse::Created().json(application)
}

/// GET /api/my-applications — a trainer's applications with each one's
/// requirement and posting college attached.
pub async fn get_my_applications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::Trainer) {
        return resp;
    }

    let listed = match application_db::get_applications_by_trainer(db.get_ref(), user.0.id).await {
        Ok(listed) => listed,
        Err(e) => {
            tracing::error!("Failed to fetch applications: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch applications",
            }));
        }
    };

    let requirement_ids: Vec<Uuid> = listed
        .iter()
        .map(|a| a.requirement_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let attached = match requirement_db::get_requirements_by_ids(db.get_ref(), requirement_ids)
        .await
    {
        Ok(found) => found,
        Err(e) => {
            tracing::error!("Failed to fetch requirements: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch applications",
            }));
        }
    };

    let college_ids: Vec<Uuid> = attached
        .iter()
        .map(|r| r.posted_by)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let colleges: HashMap<Uuid, PosterInfo> =
        match user_db::get_users_by_ids(db.get_ref(), college_ids).await {
            Ok(found) => found
                .into_iter()
                .map(|u| (u.id, PosterInfo::from(u)))
                .collect(),
            Err(e) => {
                tracing::error!("Failed to fetch colleges: {e}");
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Failed to fetch applications",
                }));
            }
        };

    let requirements: HashMap<Uuid, _> = attached.into_iter().map(|r| (r.id, r)).collect();

    let enriched: Vec<ApplicationWithRequirement> = listed
        .into_iter()
        .map(|application| {
            let requirement = requirements.get(&application.requirement_id).cloned();
            let college = requirement
                .as_ref()
                .and_then(|r| colleges.get(&r.posted_by).cloned());
            ApplicationWithRequirement {
                application,
                requirement,
                college,
            }
        })
        .collect();

    HttpResponse::Ok().json(enriched)
}

/// GET /api/requirements/{id}/applications — a college lists the
/// applications to one of its own requirements, trainer profiles attached.
pub async fn get_requirement_applications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::College) {
        return resp;
    }

    let requirement_id = path.into_inner();
    if let Err(resp) = verify_requirement_owner(
        db.get_ref(),
        requirement_id,
        user.0.id,
        "You can only view applications for your own requirements",
    )
    .await
    {
        return resp;
    }

    let listed = match application_db::get_applications_by_requirement(db.get_ref(), requirement_id)
        .await
    {
        Ok(listed) => listed,
        Err(e) => {
            tracing::error!("Failed to fetch applications: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch applications",
            }));
        }
    };

    let trainer_ids: Vec<Uuid> = listed
        .iter()
        .map(|a| a.trainer_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let trainers: HashMap<Uuid, TrainerProfile> =
        match user_db::get_users_by_ids(db.get_ref(), trainer_ids).await {
            Ok(found) => found
                .into_iter()
                .map(|u| (u.id, TrainerProfile::from(u)))
                .collect(),
            Err(e) => {
                tracing::error!("Failed to fetch trainers: {e}");
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Failed to fetch applications",
                }));
            }
        };

    let enriched: Vec<ApplicationWithTrainer> = listed
        .into_iter()
        .map(|application| {
            let trainer = trainers.get(&application.trainer_id).cloned();
            ApplicationWithTrainer {
                application,
                trainer,
            }
        })
        .collect();

    HttpResponse::Ok().json(enriched)
}

/// Shared lookup for the shortlist and accept endpoints: the application
/// must exist and belong to the requirement in the path.
async fn load_application_for_requirement(
    db: &DatabaseConnection,
    application_id: Uuid,
    requirement_id: Uuid,
    failure: &str,
) -> Result<crate::models::applications::Model, HttpResponse> {
    let application = application_db::get_application_by_id(db, application_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch application: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": failure,
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "message": "Application not found",
            }))
        })?;

    if application.requirement_id != requirement_id {
        return Err(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Application does not belong to this requirement",
        })));
    }

    Ok(application)
}

/// POST /api/requirements/{id}/shortlist — mark an applied application as
/// shortlisted and notify the trainer.
pub async fn shortlist_application(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<ApplicationAction>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::College) {
        return resp;
    }

    let requirement_id = path.into_inner();
    let requirement = match verify_requirement_owner(
        db.get_ref(),
        requirement_id,
        user.0.id,
        "You can only shortlist applications for your own requirements",
    )
    .await
    {
        Ok(requirement) => requirement,
        Err(resp) => return resp,
    };

    let application = match load_application_for_requirement(
        db.get_ref(),
        body.into_inner().application_id,
        requirement_id,
        "Failed to shortlist application",
    )
    .await
    {
        Ok(application) => application,
        Err(resp) => return resp,
    };

    if application.status != ApplicationStatus::Applied {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "This application has already been processed",
        }));
    }

    if let Err(e) = application_db::update_application_status(
        db.get_ref(),
        application.id,
        ApplicationStatus::Shortlisted,
    )
    .await
    {
        tracing::error!("Failed to shortlist application: {e}");
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "message": "Failed to shortlist application",
        }));
    }

    notification_db::notify(
        db.get_ref(),
        application.trainer_id,
        format!(
            "Your application for \"{}\" has been shortlisted",
            requirement.title
        ),
        Some("application"),
        Some(application.id),
    )
    .await;

    HttpResponse::Ok().json(serde_json::json!({
        "message": "Application shortlisted successfully",
    }))
}

/// POST /api/requirements/{id}/accept — accept an application. The status
/// change, the generated contract and the requirement moving to in_progress
/// all commit together; the trainer is notified afterwards.
pub async fn accept_application(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<ApplicationAction>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::College) {
        return resp;
    }

    let requirement_id = path.into_inner();
    let requirement = match verify_requirement_owner(
        db.get_ref(),
        requirement_id,
        user.0.id,
        "You can only accept applications for your own requirements",
    )
    .await
    {
        Ok(requirement) => requirement,
        Err(resp) => return resp,
    };

    let application = match load_application_for_requirement(
        db.get_ref(),
        body.into_inner().application_id,
        requirement_id,
        "Failed to accept application",
    )
    .await
    {
        Ok(application) => application,
        Err(resp) => return resp,
    };

    if !matches!(
        application.status,
        ApplicationStatus::Applied | ApplicationStatus::Shortlisted
    ) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "This application has already been processed",
        }));
    }

    let requirement_title = requirement.title.clone();

    let contract =
        match application_db::accept_application(db.get_ref(), application, requirement, &user.0)
            .await
        {
            Ok(contract) => contract,
            Err(e) => {
                tracing::error!("Failed to accept application: {e}");
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Failed to accept application",
                }));
            }
        };

    notification_db::notify(
        db.get_ref(),
        contract.trainer_id,
        format!(
            "Your application for \"{requirement_title}\" has been accepted! A contract is ready for your review."
        ),
        Some("contract"),
        Some(contract.id),
    )
    .await;

    HttpResponse::Ok().json(serde_json::json!({
        "message": "Application accepted successfully",
        "contract": contract,
    }))
}
