use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, HttpResponse, dev::Payload, web};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;

use crate::auth::session::{self, SESSION_COOKIE, SessionError};
use crate::models::users;

/// Extractor that resolves the session cookie and loads the corresponding
/// user from the database. Handlers that take an `AuthenticatedUser`
/// argument reject unauthenticated requests with a 401 before running.
pub struct AuthenticatedUser(pub users::Model);

fn unauthorized() -> Error {
    actix_web::error::InternalError::from_response(
        "Unauthorized",
        HttpResponse::Unauthorized().json(json!({ "message": "Unauthorized" })),
    )
    .into()
}

fn server_error(reason: &'static str) -> Error {
    actix_web::error::InternalError::from_response(
        reason,
        HttpResponse::InternalServerError().json(json!({ "message": "Internal server error" })),
    )
    .into()
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Pull the session token from the cookie.
            let cookie = req.cookie(SESSION_COOKIE).ok_or_else(unauthorized)?;

            // 2. Get the database connection from app data.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| server_error("Database not configured"))?;

            // 3. Resolve the session to its user. Expired sessions are
            //    deleted along the way, so a stale cookie behaves exactly
            //    like a missing one.
            let user = session::resolve_session(db.get_ref(), cookie.value())
                .await
                .map_err(|e| match e {
                    SessionError::Db(err) => {
                        tracing::error!("Database error while resolving session: {err}");
                        server_error("Database error")
                    }
                    _ => unauthorized(),
                })?;

            Ok(AuthenticatedUser(user))
        })
    }
}
