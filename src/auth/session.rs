use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;
use uuid::Uuid;

use crate::db::sessions as session_db;
use crate::db::users as user_db;
use crate::models::{sessions, users};

/// Name of the session cookie handed to the browser.
pub const SESSION_COOKIE: &str = "educonnect_session";

/// Sessions live for one week. Expiry is enforced lazily: an expired row is
/// deleted the next time its token is presented.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Ways a presented session token can fail to resolve to a user.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session token is not a valid UUID")]
    MalformedToken,
    #[error("session not found")]
    NotFound,
    #[error("session expired")]
    Expired,
    #[error("session user no longer exists")]
    UserMissing,
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

/// Create a session row for a user; the row id is the cookie token.
pub async fn create_session(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<sessions::Model, DbErr> {
    let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);
    session_db::insert_session(db, user_id, expires_at).await
}

/// Resolve a cookie token to the user it belongs to. Expired rows are
/// deleted on the way out.
pub async fn resolve_session(
    db: &DatabaseConnection,
    token: &str,
) -> Result<users::Model, SessionError> {
    let token: Uuid = token.parse().map_err(|_| SessionError::MalformedToken)?;

    let session = session_db::get_session(db, token)
        .await?
        .ok_or(SessionError::NotFound)?;

    if session.expires_at < Utc::now() {
        session_db::delete_session(db, token).await?;
        return Err(SessionError::Expired);
    }

    user_db::get_user_by_id(db, session.user_id)
        .await?
        .ok_or(SessionError::UserMissing)
}

/// Delete a session row if the token parses; unknown tokens are fine, so
/// logout stays idempotent.
pub async fn destroy_session(db: &DatabaseConnection, token: &str) -> Result<(), DbErr> {
    if let Ok(token) = token.parse::<Uuid>() {
        session_db::delete_session(db, token).await?;
    }
    Ok(())
}

/// Build the session cookie for a freshly created session.
pub fn session_cookie(session: &sessions::Model) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, session.id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::days(SESSION_TTL_DAYS))
        .finish()
}

/// Build an immediately-expiring cookie that clears the session from the
/// browser.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::ZERO)
        .finish()
}
