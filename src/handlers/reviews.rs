use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::applications as application_db;
use crate::db::notifications as notification_db;
use crate::db::requirements as requirement_db;
use crate::db::reviews as review_db;
use crate::db::users as user_db;
use crate::models::applications::ApplicationStatus;
use crate::models::reviews::{CreateReview, RequirementBrief, ReviewWithContext, ReviewerInfo};
use crate::models::users::Role;

/// POST /api/review — leave a review after working together. The posting
/// college reviews its trainer; an accepted trainer reviews the college.
pub async fn create_review(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateReview>,
) -> impl Responder {
    let input = body.into_inner();

    if !(1..=5).contains(&input.rating) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Rating must be between 1 and 5",
        }));
    }

    let requirement = match requirement_db::get_requirement_by_id(db.get_ref(), input.requirement_id)
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
                "message": "Failed to create review",
            }));
        }
    };

    // The poster reviews a trainer; a trainer whose application was accepted
    // reviews the college. Nobody else gets to review this requirement.
    let receiver_role = if user.0.id == requirement.posted_by {
        Role::Trainer
    } else {
        match application_db::find_by_trainer_and_requirement(
            db.get_ref(),
            user.0.id,
            requirement.id,
        )
        .await
        {
            Ok(Some(application)) if application.status == ApplicationStatus::Accepted => {
                Role::College
            }
            Ok(_) => {
                return HttpResponse::Forbidden().json(serde_json::json!({
                    "message": "You don't have permission to review this requirement",
                }));
            }
            Err(e) => {
                tracing::error!("Failed to check application: {e}");
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Failed to create review",
                }));
            }
        }
    };

    let receiver = match user_db::get_user_by_id(db.get_ref(), input.given_to).await {
        Ok(Some(receiver)) => receiver,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "message": "Receiver not found",
            }));
        }
        Err(e) => {
            tracing::error!("Failed to fetch receiver: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to create review",
            }));
        }
    };

    if receiver.role != receiver_role {
        let expected = match receiver_role {
            Role::Trainer => "trainer",
            _ => "college",
        };
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": format!("The receiver must be a {expected}"),
        }));
    }

    match review_db::find_existing_review(db.get_ref(), user.0.id, input.given_to, requirement.id)
        .await
    {
        Ok(Some(_)) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "message": "You have already reviewed this user for this requirement",
            }));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to check for existing review: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to create review",
            }));
        }
    }

    let review = match review_db::insert_review(db.get_ref(), user.0.id, input).await {
        Ok(review) => review,
        Err(e) => {
            tracing::error!("Failed to create review: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to create review",
            }));
        }
    };

    notification_db::notify(
        db.get_ref(),
        review.given_to,
        format!(
            "You received a {}-star review from {} for \"{}\"",
            review.rating, user.0.name, requirement.title
        ),
        Some("review"),
        Some(review.id),
    )
    .await;

    HttpResponse::Created().json(review)
}

/// GET /api/reviews/{user_id} — the reviews a user has received, with the
/// requirement and reviewer attached.
pub async fn get_reviews(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let listed = match review_db::get_reviews_for_user(db.get_ref(), path.into_inner()).await {
        Ok(listed) => listed,
        Err(e) => {
            tracing::error!("Failed to fetch reviews: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch reviews",
            }));
        }
    };

    let requirement_ids: Vec<Uuid> = listed
        .iter()
        .map(|r| r.requirement_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let requirements: HashMap<Uuid, RequirementBrief> =
        match requirement_db::get_requirements_by_ids(db.get_ref(), requirement_ids).await {
            Ok(found) => found
                .into_iter()
                .map(|r| {
                    (
                        r.id,
                        RequirementBrief {
                            id: r.id,
                            title: r.title,
                        },
                    )
                })
                .collect(),
            Err(e) => {
                tracing::error!("Failed to fetch requirements: {e}");
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Failed to fetch reviews",
                }));
            }
        };

    let reviewer_ids: Vec<Uuid> = listed
        .iter()
        .map(|r| r.given_by)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let reviewers: HashMap<Uuid, ReviewerInfo> =
        match user_db::get_users_by_ids(db.get_ref(), reviewer_ids).await {
            Ok(found) => found
                .into_iter()
                .map(|u| {
                    (
                        u.id,
                        ReviewerInfo {
                            id: u.id,
                            name: u.name,
                            role: u.role,
                        },
                    )
                })
                .collect(),
            Err(e) => {
                tracing::error!("Failed to fetch reviewers: {e}");
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Failed to fetch reviews",
                }));
            }
        };

    let enriched: Vec<ReviewWithContext> = listed
        .into_iter()
        .map(|review| {
            let requirement = requirements.get(&review.requirement_id).cloned();
            let reviewer = reviewers.get(&review.given_by).cloned();
            ReviewWithContext {
                review,
                requirement,
                reviewer,
            }
        })
        .collect();

    HttpResponse::Ok().json(enriched)
}

/// GET /api/ratings/{user_id} — a user's average rating, 0.0 when unrated.
pub async fn get_rating(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    match review_db::average_rating_for_user(db.get_ref(), path.into_inner()).await {
        Ok(average) => HttpResponse::Ok().json(serde_json::json!({
            "averageRating": average,
        })),
        Err(e) => {
            tracing::error!("Failed to compute average rating: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch average rating",
            }))
        }
    }
}
