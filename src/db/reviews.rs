use sea_orm::*;
use uuid::Uuid;

use crate::models::reviews::{self, CreateReview};

/// Insert a new review.
pub async fn insert_review(
    db: &DatabaseConnection,
    given_by: Uuid,
    input: CreateReview,
) -> Result<reviews::Model, DbErr> {
    let new_review = reviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        given_by: Set(given_by),
        given_to: Set(input.given_to),
        requirement_id: Set(input.requirement_id),
        rating: Set(input.rating),
        comment: Set(input.comment),
        created_at: Set(chrono::Utc::now()),
    };

    new_review.insert(db).await
}

/// Fetch the reviews received by a user, newest first.
pub async fn get_reviews_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::GivenTo.eq(user_id))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await
}

/// Find an existing review for a (reviewer, receiver, requirement) triple.
pub async fn find_existing_review(
    db: &DatabaseConnection,
    given_by: Uuid,
    given_to: Uuid,
    requirement_id: Uuid,
) -> Result<Option<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::GivenBy.eq(given_by))
        .filter(reviews::Column::GivenTo.eq(given_to))
        .filter(reviews::Column::RequirementId.eq(requirement_id))
        .one(db)
        .await
}

/// Average rating across every review a user has received, 0.0 when the
/// user has none.
pub async fn average_rating_for_user(db: &DatabaseConnection, user_id: Uuid) -> Result<f64, DbErr> {
    let user_reviews = get_reviews_for_user(db, user_id).await?;

    if user_reviews.is_empty() {
        return Ok(0.0);
    }

    let sum: i64 = user_reviews.iter().map(|r| i64::from(r.rating)).sum();
    Ok(sum as f64 / user_reviews.len() as f64)
}
