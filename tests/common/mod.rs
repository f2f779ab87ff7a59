//! Shared helpers for the integration tests: a fresh in-memory database with
//! every migration applied, the app wired the same way `main` wires it, and
//! plumbing for the session cookie.

// Each test binary compiles this module on its own and uses a different
// subset of the helpers.
#![allow(dead_code)]

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, Error, test, web};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

use educonnect_backend::handlers;

/// Connect to a fresh in-memory SQLite database and apply all migrations.
pub async fn test_db() -> DatabaseConnection {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Build the service under test on top of the given connection.
pub async fn test_app(
    db: DatabaseConnection,
) -> impl Service<Request, Response = ServiceResponse, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(handlers::json_config())
            .app_data(handlers::path_config())
            .service(web::scope("/api").configure(handlers::init_routes)),
    )
    .await
}

/// Pull the session cookie out of a register or login response.
pub fn session_cookie(resp: &ServiceResponse) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "educonnect_session")
        .expect("Response should set the session cookie")
        .into_owned()
}

/// Registration payload for a trainer account.
pub fn trainer_payload(username: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "password": "Secret@123",
        "name": format!("{username} the Trainer"),
        "email": format!("{username}@example.com"),
        "role": "trainer",
        "skills": ["Rust", "Teaching"],
        "bio": "Hands-on instructor.",
    })
}

/// Registration payload for a college account.
pub fn college_payload(username: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "password": "Secret@123",
        "name": format!("{username} College"),
        "email": format!("{username}@example.com"),
        "role": "college",
        "organization": format!("{username} Education Trust"),
    })
}

/// Registration payload for an admin account.
pub fn admin_payload(username: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "password": "Secret@123",
        "name": format!("{username} the Admin"),
        "email": format!("{username}@example.com"),
        "role": "admin",
    })
}

/// Register an account and return the created user plus its session cookie.
pub async fn register(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    payload: serde_json::Value,
) -> (serde_json::Value, Cookie<'static>) {
    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(
        resp.status(),
        StatusCode::CREATED,
        "registration should succeed"
    );
    let cookie = session_cookie(&resp);
    let body = test::read_body_json(resp).await;
    (body, cookie)
}

/// A college posts a requirement and the created record is returned.
pub async fn post_requirement(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    cookie: &Cookie<'static>,
    title: &str,
) -> serde_json::Value {
    let req = test::TestRequest::post()
        .uri("/api/requirements")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({
            "title": title,
            "description": "A multi-week training engagement.",
            "mode": "online",
            "skills_required": ["Rust"],
            "duration_weeks": 6,
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(
        resp.status(),
        StatusCode::CREATED,
        "posting a requirement should succeed"
    );
    test::read_body_json(resp).await
}
