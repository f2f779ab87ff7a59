//! End-to-end tests for the marketplace flow: posting requirements, applying,
//! shortlisting, accepting, contract signing, payment, reviews, notifications
//! and the admin endpoints.
//!
//! Run with: `cargo test --test workflow_test`

mod common;

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{Error, test};
use uuid::Uuid;

use common::{
    admin_payload, college_payload, post_requirement, register, test_app, test_db, trainer_payload,
};

/// GET a path with the given session and return the status plus JSON body.
async fn get_json(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    cookie: &Cookie<'static>,
    path: &str,
) -> (StatusCode, serde_json::Value) {
    let req = test::TestRequest::get()
        .uri(path)
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

/// POST a JSON body with the given session and return the status plus body.
async fn post_json(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    cookie: &Cookie<'static>,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let req = test::TestRequest::post()
        .uri(path)
        .cookie(cookie.clone())
        .set_json(&body)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

/// PATCH a JSON body with the given session and return the status plus body.
async fn patch_json(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    cookie: &Cookie<'static>,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let req = test::TestRequest::patch()
        .uri(path)
        .cookie(cookie.clone())
        .set_json(&body)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

/// DELETE a path with the given session and return the status plus body.
async fn delete_json(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    cookie: &Cookie<'static>,
    path: &str,
) -> (StatusCode, serde_json::Value) {
    let req = test::TestRequest::delete()
        .uri(path)
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

/// Drive a posting through apply and accept. Returns the requirement id and
/// the id of the contract generated by the acceptance.
async fn accept_flow(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    college_cookie: &Cookie<'static>,
    trainer_cookie: &Cookie<'static>,
    title: &str,
) -> (String, String) {
    let requirement = post_requirement(app, college_cookie, title).await;
    let requirement_id = requirement["id"].as_str().unwrap().to_string();

    let (status, application) = post_json(
        app,
        trainer_cookie,
        &format!("/api/apply/{requirement_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let application_id = application["id"].as_str().unwrap().to_string();

    let (status, body) = post_json(
        app,
        college_cookie,
        &format!("/api/requirements/{requirement_id}/accept"),
        serde_json::json!({ "applicationId": application_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let contract_id = body["contract"]["id"].as_str().unwrap().to_string();

    (requirement_id, contract_id)
}

#[actix_web::test]
async fn test_full_marketplace_workflow() {
    let app = test_app(test_db().await).await;

    let (college, college_cookie) = register(&app, college_payload("sunrise")).await;
    let (trainer, trainer_cookie) = register(&app, trainer_payload("john")).await;

    // The college posts a requirement and trainers see it in the open list.
    let requirement = post_requirement(&app, &college_cookie, "Rust Bootcamp").await;
    let requirement_id = requirement["id"].as_str().unwrap().to_string();
    assert_eq!(requirement["status"], "open");

    let (status, listed) = get_json(&app, &trainer_cookie, "/api/requirements").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["title"], "Rust Bootcamp");
    assert_eq!(listed[0]["poster"]["name"], "sunrise College");

    // The trainer applies; applying twice is rejected.
    let (status, application) = post_json(
        &app,
        &trainer_cookie,
        &format!("/api/apply/{requirement_id}"),
        serde_json::json!({ "cover_letter": "I would love to teach this." }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(application["status"], "applied");
    let application_id = application["id"].as_str().unwrap().to_string();

    let (status, body) = post_json(
        &app,
        &trainer_cookie,
        &format!("/api/apply/{requirement_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You have already applied to this requirement");

    // The college sees the application with the trainer profile attached.
    let (status, applications) = get_json(
        &app,
        &college_cookie,
        &format!("/api/requirements/{requirement_id}/applications"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(applications.as_array().unwrap().len(), 1);
    assert_eq!(applications[0]["trainer"]["name"], "john the Trainer");
    assert_eq!(applications[0]["cover_letter"], "I would love to teach this.");

    // Shortlist, then accept. Accepting generates the contract and moves the
    // requirement to in_progress.
    let action = serde_json::json!({ "applicationId": application_id });
    let (status, body) = post_json(
        &app,
        &college_cookie,
        &format!("/api/requirements/{requirement_id}/shortlist"),
        action.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Application shortlisted successfully");

    let (status, body) = post_json(
        &app,
        &college_cookie,
        &format!("/api/requirements/{requirement_id}/accept"),
        action,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Application accepted successfully");
    let contract_id = body["contract"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["contract"]["payment_status"], "pending");
    assert_eq!(body["contract"]["fee"], 1000);

    let (status, detail) = get_json(
        &app,
        &college_cookie,
        &format!("/api/requirements/{requirement_id}"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["status"], "in_progress");

    // In-progress requirements disappear from the trainer-facing list.
    let (_, listed) = get_json(&app, &trainer_cookie, "/api/requirements").await;
    assert!(listed.as_array().unwrap().is_empty());

    // Both parties see the contract with the counterparty attached.
    let (status, contracts) = get_json(&app, &trainer_cookie, "/api/contracts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(contracts.as_array().unwrap().len(), 1);
    assert_eq!(contracts[0]["requirement"]["title"], "Rust Bootcamp");
    assert_eq!(contracts[0]["college"]["organization"], "sunrise Education Trust");

    let (_, contracts) = get_json(&app, &college_cookie, "/api/contracts").await;
    assert_eq!(contracts[0]["trainer"]["name"], "john the Trainer");

    // Payment cannot be marked until both parties have signed.
    let contract_action = serde_json::json!({ "contractId": contract_id });
    let (status, body) = post_json(
        &app,
        &college_cookie,
        "/api/contract/payment",
        contract_action.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Both parties must sign the contract before marking payment as complete"
    );

    // The trainer signs once; a second signature is rejected.
    let (status, body) = post_json(
        &app,
        &trainer_cookie,
        "/api/contract/sign",
        contract_action.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contract signed successfully");

    let (status, body) = post_json(
        &app,
        &trainer_cookie,
        "/api/contract/sign",
        contract_action.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You have already signed this contract");

    // The college signs and marks payment; paying twice is rejected.
    let (status, _) = post_json(
        &app,
        &college_cookie,
        "/api/contract/sign",
        contract_action.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(
        &app,
        &college_cookie,
        "/api/contract/payment",
        contract_action.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment marked as completed");

    let (status, body) = post_json(
        &app,
        &college_cookie,
        "/api/contract/payment",
        contract_action,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Payment has already been marked as completed");

    // The contract detail carries both signatures, the paid status and the
    // contact details of both parties.
    let (status, detail) = get_json(
        &app,
        &trainer_cookie,
        &format!("/api/contracts/{contract_id}"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["signed_by_trainer"], true);
    assert_eq!(detail["signed_by_college"], true);
    assert_eq!(detail["payment_status"], "paid");
    assert_eq!(detail["trainer"]["email"], "john@example.com");
    assert_eq!(detail["college"]["organization"], "sunrise Education Trust");

    // Both sides leave a review; a duplicate is rejected.
    let college_id = college["id"].as_str().unwrap().to_string();
    let trainer_id = trainer["id"].as_str().unwrap().to_string();

    let (status, review) = post_json(
        &app,
        &college_cookie,
        "/api/review",
        serde_json::json!({
            "given_to": trainer_id,
            "requirement_id": requirement_id,
            "rating": 5,
            "comment": "Fantastic sessions.",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(review["rating"], 5);

    let (status, _) = post_json(
        &app,
        &trainer_cookie,
        "/api/review",
        serde_json::json!({
            "given_to": college_id,
            "requirement_id": requirement_id,
            "rating": 4,
            "comment": "Great cohort.",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(
        &app,
        &college_cookie,
        "/api/review",
        serde_json::json!({
            "given_to": trainer_id,
            "requirement_id": requirement_id,
            "rating": 3,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "You have already reviewed this user for this requirement"
    );

    // Review listings carry the requirement and the reviewer; the average
    // lines up with what was given.
    let (status, reviews) = get_json(&app, &trainer_cookie, &format!("/api/reviews/{trainer_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviews.as_array().unwrap().len(), 1);
    assert_eq!(reviews[0]["requirement"]["title"], "Rust Bootcamp");
    assert_eq!(reviews[0]["reviewer"]["role"], "college");

    let (_, rating) = get_json(&app, &trainer_cookie, &format!("/api/ratings/{trainer_id}")).await;
    assert_eq!(rating["averageRating"], 5.0);
    let (_, rating) = get_json(&app, &trainer_cookie, &format!("/api/ratings/{college_id}")).await;
    assert_eq!(rating["averageRating"], 4.0);

    // The trainer heard about every step along the way.
    let (status, notifications) = get_json(&app, &trainer_cookie, "/api/notifications").await;
    assert_eq!(status, StatusCode::OK);
    let messages: Vec<String> = notifications
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["message"].as_str().unwrap().to_string())
        .collect();
    assert!(messages.iter().any(|m| m.contains("shortlisted")));
    assert!(messages.iter().any(|m| m.contains("accepted")));
    assert!(messages.iter().any(|m| m.contains("signed the contract")));
    assert!(messages.iter().any(|m| m.contains("Payment")));
    assert!(messages.iter().any(|m| m.contains("review")));

    // Marking one read sticks.
    let notification_id = notifications[0]["id"].as_str().unwrap().to_string();
    let (status, body) = patch_json(
        &app,
        &trainer_cookie,
        &format!("/api/notifications/{notification_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Notification marked as read");

    let (_, notifications) = get_json(&app, &trainer_cookie, "/api/notifications").await;
    let marked = notifications
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == notification_id.as_str())
        .unwrap();
    assert_eq!(marked["read"], true);
}

#[actix_web::test]
async fn test_requirement_ownership_checks() {
    let app = test_app(test_db().await).await;
    let (_, owner_cookie) = register(&app, college_payload("owner")).await;
    let (_, other_cookie) = register(&app, college_payload("other")).await;

    let requirement = post_requirement(&app, &owner_cookie, "Owned Posting").await;
    let requirement_id = requirement["id"].as_str().unwrap();

    let (status, body) = patch_json(
        &app,
        &other_cookie,
        &format!("/api/requirements/{requirement_id}"),
        serde_json::json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You can only update your own requirements");

    let (status, body) = delete_json(
        &app,
        &other_cookie,
        &format!("/api/requirements/{requirement_id}"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You can only delete your own requirements");

    let (status, body) = get_json(
        &app,
        &other_cookie,
        &format!("/api/requirements/{requirement_id}/applications"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You can only view applications for your own requirements"
    );

    // The college-facing list only shows the caller's own postings.
    let (_, listed) = get_json(&app, &other_cookie, "/api/requirements").await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_role_restrictions() {
    let app = test_app(test_db().await).await;
    let (_, trainer_cookie) = register(&app, trainer_payload("taylor")).await;
    let (_, college_cookie) = register(&app, college_payload("campus")).await;

    // Trainers cannot post requirements.
    let (status, body) = post_json(
        &app,
        &trainer_cookie,
        "/api/requirements",
        serde_json::json!({
            "title": "Nope",
            "description": "Nope",
            "mode": "online",
            "duration_weeks": 1,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden");

    // Colleges cannot apply or list trainer applications.
    let (status, _) = post_json(
        &app,
        &college_cookie,
        &format!("/api/apply/{}", Uuid::new_v4()),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = get_json(&app, &college_cookie, "/api/my-applications").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Only colleges mark payment.
    let (status, _) = post_json(
        &app,
        &trainer_cookie,
        "/api/contract/payment",
        serde_json::json!({ "contractId": Uuid::new_v4() }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Neither role reaches the admin endpoints.
    let (status, _) = get_json(&app, &trainer_cookie, "/api/admin/statistics").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = get_json(&app, &college_cookie, "/api/admin/trainers").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_requirement_status_moves_forward_only() {
    let app = test_app(test_db().await).await;
    let (_, college_cookie) = register(&app, college_payload("forward")).await;

    let requirement = post_requirement(&app, &college_cookie, "One Way Street").await;
    let requirement_id = requirement["id"].as_str().unwrap();
    let path = format!("/api/requirements/{requirement_id}");

    // Re-asserting the current status is not a move forward.
    let (status, body) = patch_json(&app, &college_cookie, &path, serde_json::json!({ "status": "open" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid status transition");

    // Skipping straight to completed is allowed.
    let (status, body) = patch_json(
        &app,
        &college_cookie,
        &path,
        serde_json::json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Status updated successfully");

    // Going back is not.
    let (status, body) = patch_json(
        &app,
        &college_cookie,
        &path,
        serde_json::json!({ "status": "in_progress" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid status transition");

    let (_, detail) = get_json(&app, &college_cookie, &path).await;
    assert_eq!(detail["status"], "completed");
}

#[actix_web::test]
async fn test_requirement_deletion_rules() {
    let app = test_app(test_db().await).await;
    let (_, college_cookie) = register(&app, college_payload("cleanup")).await;
    let (_, trainer_cookie) = register(&app, trainer_payload("keen")).await;

    // A requirement with applications cannot be deleted.
    let with_applications = post_requirement(&app, &college_cookie, "Popular Posting").await;
    let with_applications_id = with_applications["id"].as_str().unwrap();
    let (status, _) = post_json(
        &app,
        &trainer_cookie,
        &format!("/api/apply/{with_applications_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = delete_json(
        &app,
        &college_cookie,
        &format!("/api/requirements/{with_applications_id}"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Cannot delete requirement with existing applications"
    );

    // An untouched open requirement deletes cleanly and is gone afterwards.
    let untouched = post_requirement(&app, &college_cookie, "Quiet Posting").await;
    let untouched_id = untouched["id"].as_str().unwrap();
    let (status, body) = delete_json(
        &app,
        &college_cookie,
        &format!("/api/requirements/{untouched_id}"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Requirement deleted successfully");

    let (status, body) = get_json(
        &app,
        &college_cookie,
        &format!("/api/requirements/{untouched_id}"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Requirement not found");

    // Once a requirement has left the open state it stays on the books.
    let closed = post_requirement(&app, &college_cookie, "Closed Posting").await;
    let closed_id = closed["id"].as_str().unwrap();
    patch_json(
        &app,
        &college_cookie,
        &format!("/api/requirements/{closed_id}"),
        serde_json::json!({ "status": "completed" }),
    )
    .await;

    let (status, body) = delete_json(
        &app,
        &college_cookie,
        &format!("/api/requirements/{closed_id}"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Cannot delete a requirement that is no longer open"
    );
}

#[actix_web::test]
async fn test_apply_rules() {
    let app = test_app(test_db().await).await;
    let (_, college_cookie) = register(&app, college_payload("gatekeeper")).await;
    let (_, trainer_cookie) = register(&app, trainer_payload("eager")).await;

    // Unknown requirement.
    let (status, body) = post_json(
        &app,
        &trainer_cookie,
        &format!("/api/apply/{}", Uuid::new_v4()),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Requirement not found");

    // A requirement that is no longer open.
    let requirement = post_requirement(&app, &college_cookie, "Already Done").await;
    let requirement_id = requirement["id"].as_str().unwrap();
    patch_json(
        &app,
        &college_cookie,
        &format!("/api/requirements/{requirement_id}"),
        serde_json::json!({ "status": "completed" }),
    )
    .await;

    let (status, body) = post_json(
        &app,
        &trainer_cookie,
        &format!("/api/apply/{requirement_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "This training requirement is not open for applications"
    );
}

#[actix_web::test]
async fn test_shortlist_and_accept_guards() {
    let app = test_app(test_db().await).await;
    let (_, college_one) = register(&app, college_payload("first")).await;
    let (_, college_two) = register(&app, college_payload("second")).await;
    let (_, trainer_one) = register(&app, trainer_payload("uno")).await;
    let (_, trainer_two) = register(&app, trainer_payload("dos")).await;

    let requirement = post_requirement(&app, &college_one, "Guarded Posting").await;
    let requirement_id = requirement["id"].as_str().unwrap().to_string();
    let (status, application) = post_json(
        &app,
        &trainer_one,
        &format!("/api/apply/{requirement_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let application_id = application["id"].as_str().unwrap().to_string();

    // A second posting owned by someone else, with its own application.
    let foreign = post_requirement(&app, &college_two, "Foreign Posting").await;
    let foreign_id = foreign["id"].as_str().unwrap();
    let (_, foreign_application) = post_json(
        &app,
        &trainer_two,
        &format!("/api/apply/{foreign_id}"),
        serde_json::json!({}),
    )
    .await;
    let foreign_application_id = foreign_application["id"].as_str().unwrap();

    let shortlist_path = format!("/api/requirements/{requirement_id}/shortlist");
    let accept_path = format!("/api/requirements/{requirement_id}/accept");

    // Unknown application id.
    let (status, body) = post_json(
        &app,
        &college_one,
        &shortlist_path,
        serde_json::json!({ "applicationId": Uuid::new_v4() }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Application not found");

    // An application that belongs to a different requirement.
    let (status, body) = post_json(
        &app,
        &college_one,
        &shortlist_path,
        serde_json::json!({ "applicationId": foreign_application_id }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Application does not belong to this requirement");

    // A non-owner cannot act on the posting at all.
    let (status, body) = post_json(
        &app,
        &college_two,
        &shortlist_path,
        serde_json::json!({ "applicationId": application_id }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You can only shortlist applications for your own requirements"
    );

    // Shortlisting twice is rejected; accepting a shortlisted application is
    // fine; accepting it again is not.
    let action = serde_json::json!({ "applicationId": application_id });
    let (status, _) = post_json(&app, &college_one, &shortlist_path, action.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(&app, &college_one, &shortlist_path, action.clone()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "This application has already been processed");

    let (status, _) = post_json(&app, &college_one, &accept_path, action.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(&app, &college_one, &accept_path, action).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "This application has already been processed");

    // The trainer sees the accepted status with the posting attached.
    let (status, mine) = get_json(&app, &trainer_one, "/api/my-applications").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["status"], "accepted");
    assert_eq!(mine[0]["requirement"]["title"], "Guarded Posting");
    assert_eq!(mine[0]["college"]["name"], "first College");
}

#[actix_web::test]
async fn test_review_permissions_and_validation() {
    let app = test_app(test_db().await).await;
    let (college, college_cookie) = register(&app, college_payload("reviewer")).await;
    let (trainer, trainer_cookie) = register(&app, trainer_payload("reviewed")).await;
    let (_, bystander_cookie) = register(&app, trainer_payload("bystander")).await;
    let college_id = college["id"].as_str().unwrap().to_string();
    let trainer_id = trainer["id"].as_str().unwrap().to_string();

    // Both trainers apply, only one is accepted.
    let requirement = post_requirement(&app, &college_cookie, "Review Target").await;
    let requirement_id = requirement["id"].as_str().unwrap().to_string();
    let (_, application) = post_json(
        &app,
        &trainer_cookie,
        &format!("/api/apply/{requirement_id}"),
        serde_json::json!({}),
    )
    .await;
    let (status, _) = post_json(
        &app,
        &bystander_cookie,
        &format!("/api/apply/{requirement_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = post_json(
        &app,
        &college_cookie,
        &format!("/api/requirements/{requirement_id}/accept"),
        serde_json::json!({ "applicationId": application["id"].as_str().unwrap() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Ratings are clamped to 1..=5 before anything else is looked at.
    let (status, body) = post_json(
        &app,
        &college_cookie,
        "/api/review",
        serde_json::json!({
            "given_to": trainer_id,
            "requirement_id": requirement_id,
            "rating": 6,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Rating must be between 1 and 5");

    // Unknown requirement and unknown receiver.
    let (status, body) = post_json(
        &app,
        &college_cookie,
        "/api/review",
        serde_json::json!({
            "given_to": trainer_id,
            "requirement_id": Uuid::new_v4(),
            "rating": 5,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Requirement not found");

    let (status, body) = post_json(
        &app,
        &college_cookie,
        "/api/review",
        serde_json::json!({
            "given_to": Uuid::new_v4(),
            "requirement_id": requirement_id,
            "rating": 5,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Receiver not found");

    // The poster must review a trainer, and the trainer must review a college.
    let (status, body) = post_json(
        &app,
        &college_cookie,
        "/api/review",
        serde_json::json!({
            "given_to": college_id,
            "requirement_id": requirement_id,
            "rating": 5,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The receiver must be a trainer");

    let (status, body) = post_json(
        &app,
        &trainer_cookie,
        "/api/review",
        serde_json::json!({
            "given_to": trainer_id,
            "requirement_id": requirement_id,
            "rating": 5,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The receiver must be a college");

    // An applicant who was never accepted has no standing to review.
    let (status, body) = post_json(
        &app,
        &bystander_cookie,
        "/api/review",
        serde_json::json!({
            "given_to": college_id,
            "requirement_id": requirement_id,
            "rating": 1,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You don't have permission to review this requirement"
    );

    // An unreviewed user averages to zero.
    let (status, rating) = get_json(&app, &college_cookie, &format!("/api/ratings/{trainer_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rating["averageRating"], 0.0);
}

#[actix_web::test]
async fn test_contract_access_is_limited_to_its_parties() {
    let app = test_app(test_db().await).await;
    let (_, college_cookie) = register(&app, college_payload("partyone")).await;
    let (_, trainer_cookie) = register(&app, trainer_payload("partytwo")).await;
    let (_, outsider_cookie) = register(&app, trainer_payload("outsider")).await;

    let (_, contract_id) = accept_flow(&app, &college_cookie, &trainer_cookie, "Private Deal").await;

    let (status, body) = get_json(
        &app,
        &outsider_cookie,
        &format!("/api/contracts/{contract_id}"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You don't have permission to view this contract"
    );

    let (status, body) = post_json(
        &app,
        &outsider_cookie,
        "/api/contract/sign",
        serde_json::json!({ "contractId": contract_id }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You don't have permission to sign this contract"
    );

    // Unknown contract ids read as missing, not forbidden.
    let (status, body) = get_json(
        &app,
        &trainer_cookie,
        &format!("/api/contracts/{}", Uuid::new_v4()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Contract not found");

    // An uninvolved trainer has an empty contract list.
    let (status, contracts) = get_json(&app, &outsider_cookie, "/api/contracts").await;
    assert_eq!(status, StatusCode::OK);
    assert!(contracts.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_notifications_are_scoped_to_their_owner() {
    let app = test_app(test_db().await).await;
    let (_, college_cookie) = register(&app, college_payload("listener")).await;
    let (_, trainer_cookie) = register(&app, trainer_payload("sender")).await;

    let requirement = post_requirement(&app, &college_cookie, "Watched Posting").await;
    let requirement_id = requirement["id"].as_str().unwrap();
    let (status, _) = post_json(
        &app,
        &trainer_cookie,
        &format!("/api/apply/{requirement_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // The application produced exactly one unread notification for the poster.
    let (status, notifications) = get_json(&app, &college_cookie, "/api/notifications").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notifications.as_array().unwrap().len(), 1);
    assert_eq!(notifications[0]["read"], false);
    assert!(
        notifications[0]["message"]
            .as_str()
            .unwrap()
            .contains("New application received")
    );
    let notification_id = notifications[0]["id"].as_str().unwrap().to_string();

    // Someone else cannot mark it read.
    let (status, body) = patch_json(
        &app,
        &trainer_cookie,
        &format!("/api/notifications/{notification_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Notification not found");

    // The owner can.
    let (status, _) = patch_json(
        &app,
        &college_cookie,
        &format!("/api/notifications/{notification_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_admin_endpoints() {
    let app = test_app(test_db().await).await;
    let (_, admin_cookie) = register(&app, admin_payload("root")).await;
    let (trainer, trainer_cookie) = register(&app, trainer_payload("newbie")).await;
    let (college, _) = register(&app, college_payload("member")).await;
    let trainer_id = trainer["id"].as_str().unwrap().to_string();
    let college_id = college["id"].as_str().unwrap().to_string();

    // Role-filtered listings.
    let (status, trainers) = get_json(&app, &admin_cookie, "/api/admin/trainers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(trainers.as_array().unwrap().len(), 1);
    assert_eq!(trainers[0]["username"], "newbie");
    assert_eq!(trainers[0]["verified"], false);

    let (status, colleges) = get_json(&app, &admin_cookie, "/api/admin/colleges").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(colleges.as_array().unwrap().len(), 1);
    assert_eq!(colleges[0]["username"], "member");

    // Approving flips the verified flag and notifies the trainer.
    let (status, body) = patch_json(
        &app,
        &admin_cookie,
        &format!("/api/admin/approve-trainer/{trainer_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Trainer approved successfully");

    let (_, trainers) = get_json(&app, &admin_cookie, "/api/admin/trainers").await;
    assert_eq!(trainers[0]["verified"], true);

    let (_, notifications) = get_json(&app, &trainer_cookie, "/api/notifications").await;
    assert!(
        notifications
            .as_array()
            .unwrap()
            .iter()
            .any(|n| n["message"].as_str().unwrap().contains("approved by admin"))
    );

    // Approval only applies to trainers, and only to ones that exist.
    let (status, body) = patch_json(
        &app,
        &admin_cookie,
        &format!("/api/admin/approve-trainer/{college_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User is not a trainer");

    let (status, body) = patch_json(
        &app,
        &admin_cookie,
        &format!("/api/admin/approve-trainer/{}", Uuid::new_v4()),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Trainer not found");

    // Blocking clears the verified flag, unblocking restores it.
    let (status, body) = patch_json(
        &app,
        &admin_cookie,
        &format!("/api/admin/block-user/{trainer_id}"),
        serde_json::json!({ "blocked": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User blocked successfully");

    let (_, trainers) = get_json(&app, &admin_cookie, "/api/admin/trainers").await;
    assert_eq!(trainers[0]["verified"], false);

    let (status, body) = patch_json(
        &app,
        &admin_cookie,
        &format!("/api/admin/block-user/{trainer_id}"),
        serde_json::json!({ "blocked": false }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User unblocked successfully");

    let (status, body) = patch_json(
        &app,
        &admin_cookie,
        &format!("/api/admin/block-user/{}", Uuid::new_v4()),
        serde_json::json!({ "blocked": true }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[actix_web::test]
async fn test_statistics_reflect_marketplace_activity() {
    let app = test_app(test_db().await).await;
    let (_, admin_cookie) = register(&app, admin_payload("counter")).await;
    let (_, college_cookie) = register(&app, college_payload("metrics")).await;
    let (_, trainer_cookie) = register(&app, trainer_payload("busy")).await;
    let (_, idle_trainer_cookie) = register(&app, trainer_payload("idle")).await;

    // One accepted posting, one still open with a pending application.
    let (_, contract_id) = accept_flow(&app, &college_cookie, &trainer_cookie, "Counted Posting").await;
    let open_requirement = post_requirement(&app, &college_cookie, "Open Posting").await;
    let open_id = open_requirement["id"].as_str().unwrap();
    let (status, _) = post_json(
        &app,
        &idle_trainer_cookie,
        &format!("/api/apply/{open_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, stats) = get_json(&app, &admin_cookie, "/api/admin/statistics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["users"]["trainers"], 2);
    assert_eq!(stats["users"]["colleges"], 1);
    assert_eq!(stats["users"]["total"], 4);
    assert_eq!(stats["requirements"]["open"], 1);
    assert_eq!(stats["requirements"]["inProgress"], 1);
    assert_eq!(stats["requirements"]["completed"], 0);
    assert_eq!(stats["requirements"]["total"], 2);
    assert_eq!(stats["applications"]["total"], 2);
    assert_eq!(stats["applications"]["accepted"], 1);
    assert_eq!(stats["applications"]["pending"], 1);
    assert_eq!(stats["contracts"]["total"], 1);
    assert_eq!(stats["contracts"]["signed"], 0);
    assert_eq!(stats["contracts"]["paid"], 0);

    // Signing and paying move the contract counters.
    let contract_action = serde_json::json!({ "contractId": contract_id });
    post_json(&app, &trainer_cookie, "/api/contract/sign", contract_action.clone()).await;
    post_json(&app, &college_cookie, "/api/contract/sign", contract_action.clone()).await;
    let (status, _) = post_json(&app, &college_cookie, "/api/contract/payment", contract_action).await;
    assert_eq!(status, StatusCode::OK);

    let (_, stats) = get_json(&app, &admin_cookie, "/api/admin/statistics").await;
    assert_eq!(stats["contracts"]["signed"], 1);
    assert_eq!(stats["contracts"]["paid"], 1);
}
