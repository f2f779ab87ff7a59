//! Integration tests for registration, login, sessions and profile updates.
//!
//! Every test runs against its own in-memory SQLite database with the full
//! migration set applied, so tests never interfere with each other.
//!
//! Run with: `cargo test --test auth_test`

mod common;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test;
use uuid::Uuid;

use common::{college_payload, register, session_cookie, test_app, test_db, trainer_payload};

#[actix_web::test]
async fn test_register_returns_user_and_session_cookie() {
    let app = test_app(test_db().await).await;

    let (user, cookie) = register(&app, trainer_payload("alice")).await;

    assert_eq!(user["username"], "alice");
    assert_eq!(user["role"], "trainer");
    assert_eq!(user["verified"], false);
    assert_eq!(user["skills"], serde_json::json!(["Rust", "Teaching"]));
    assert!(
        user.get("password_hash").is_none(),
        "the password hash must never appear in a response"
    );

    // The cookie handed out at registration works right away.
    let req = test::TestRequest::get()
        .uri("/api/user")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let me: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(me["username"], "alice");
}

#[actix_web::test]
async fn test_register_rejects_missing_fields() {
    let app = test_app(test_db().await).await;

    let mut payload = trainer_payload("bob");
    payload.as_object_mut().unwrap().remove("name");

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Missing required field: name");

    // An empty string counts as missing too.
    let mut payload = trainer_payload("bob");
    payload["password"] = serde_json::json!("");

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Missing required field: password");
}

#[actix_web::test]
async fn test_register_rejects_duplicate_username_and_email() {
    let app = test_app(test_db().await).await;
    register(&app, trainer_payload("carol")).await;

    // Same username, different email.
    let mut payload = trainer_payload("carol");
    payload["email"] = serde_json::json!("someone-else@example.com");
    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Username already exists");

    // Different username, same email.
    let mut payload = trainer_payload("carol2");
    payload["email"] = serde_json::json!("carol@example.com");
    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email already exists");
}

#[actix_web::test]
async fn test_register_accepts_a_single_skill_string() {
    let app = test_app(test_db().await).await;

    let mut payload = trainer_payload("dave");
    payload["skills"] = serde_json::json!("Rust");

    let (user, _) = register(&app, payload).await;
    assert_eq!(user["skills"], serde_json::json!(["Rust"]));
}

#[actix_web::test]
async fn test_login_round_trip() {
    let app = test_app(test_db().await).await;
    register(&app, college_payload("erin")).await;

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(serde_json::json!({
            "username": "erin",
            "password": "Secret@123",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);
    let user: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(user["role"], "college");

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let me: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(me["username"], "erin");
}

#[actix_web::test]
async fn test_login_rejects_bad_credentials() {
    let app = test_app(test_db().await).await;
    register(&app, trainer_payload("frank")).await;

    // Wrong password and unknown username produce the same message.
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(serde_json::json!({
            "username": "frank",
            "password": "wrong-password",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid username or password");

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(serde_json::json!({
            "username": "nobody",
            "password": "Secret@123",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid username or password");
}

#[actix_web::test]
async fn test_logout_invalidates_the_session() {
    let app = test_app(test_db().await).await;
    let (_, cookie) = register(&app, trainer_payload("grace")).await;

    let req = test::TestRequest::post()
        .uri("/api/logout")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Logged out successfully");

    // The old token no longer resolves.
    let req = test::TestRequest::get()
        .uri("/api/user")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Logging out without a session is still a 200.
    let req = test::TestRequest::post().uri("/api/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Not logged in");
}

#[actix_web::test]
async fn test_unauthenticated_requests_are_rejected() {
    let app = test_app(test_db().await).await;

    // No cookie at all.
    let req = test::TestRequest::get().uri("/api/user").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized");

    // A cookie that is not even a UUID.
    let req = test::TestRequest::get()
        .uri("/api/user")
        .cookie(Cookie::new("educonnect_session", "not-a-uuid"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // A well-formed token that matches no session.
    let req = test::TestRequest::get()
        .uri("/api/user")
        .cookie(Cookie::new("educonnect_session", Uuid::new_v4().to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_expired_session_is_rejected_and_deleted() {
    let db = test_db().await;
    let app = test_app(db.clone()).await;
    let (user, _) = register(&app, trainer_payload("henry")).await;
    let user_id = Uuid::parse_str(user["id"].as_str().unwrap()).unwrap();

    // Plant a session that expired yesterday.
    let expired = educonnect_backend::db::sessions::insert_session(
        &db,
        user_id,
        chrono::Utc::now() - chrono::Duration::days(1),
    )
    .await
    .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/user")
        .cookie(Cookie::new("educonnect_session", expired.id.to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // The stale row was cleaned up on the way through.
    let gone = educonnect_backend::db::sessions::get_session(&db, expired.id)
        .await
        .unwrap();
    assert!(gone.is_none());
}

#[actix_web::test]
async fn test_profile_update_changes_only_given_fields() {
    let app = test_app(test_db().await).await;
    let (_, cookie) = register(&app, trainer_payload("iris")).await;

    let req = test::TestRequest::patch()
        .uri("/api/profile/update")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({
            "bio": "Updated bio",
            "skills": ["Go", "Kubernetes"],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let user: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(user["bio"], "Updated bio");
    assert_eq!(user["skills"], serde_json::json!(["Go", "Kubernetes"]));
    assert_eq!(user["name"], "iris the Trainer");
    assert!(user["updated_at"].is_string());

    // Role and verified are not writable through this endpoint.
    let req = test::TestRequest::patch()
        .uri("/api/profile/update")
        .cookie(cookie)
        .set_json(serde_json::json!({
            "role": "admin",
            "verified": true,
            "name": "Iris",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let user: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(user["name"], "Iris");
    assert_eq!(user["role"], "trainer");
    assert_eq!(user["verified"], false);
}
