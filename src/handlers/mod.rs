pub mod admin;
pub mod applications;
pub mod auth;
pub mod contracts;
pub mod notifications;
pub mod requirements;
pub mod reviews;

use actix_web::{HttpResponse, web};

/// Rewrites JSON body decode failures into the API's standard error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid request body: {err}");
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "message": message })),
        )
        .into()
    })
}

/// Rewrites path parameter decode failures (bad UUIDs, mostly) the same way.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid path parameter: {err}");
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "message": message })),
        )
        .into()
    })
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth & profile routes ──
    cfg.route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::post().to(auth::logout))
        .route("/user", web::get().to(auth::current_user))
        .route("/profile", web::get().to(auth::current_user))
        .route("/profile/update", web::patch().to(auth::update_profile));

    // ── Requirement routes (colleges post, trainers browse) ──
    cfg.service(
        web::scope("/requirements")
            .route("", web::get().to(requirements::get_requirements))
            .route("", web::post().to(requirements::create_requirement))
            .route("/{id}", web::get().to(requirements::get_requirement))
            .route("/{id}", web::patch().to(requirements::update_requirement_status))
            .route("/{id}", web::delete().to(requirements::delete_requirement))
            .route(
                "/{id}/applications",
                web::get().to(applications::get_requirement_applications),
            )
            .route(
                "/{id}/shortlist",
                web::post().to(applications::shortlist_application),
            )
            .route(
                "/{id}/accept",
                web::post().to(applications::accept_application),
            ),
    );

    // ── Application routes (trainer side) ──
    cfg.route("/apply/{requirement_id}", web::post().to(applications::apply))
        .route(
            "/my-applications",
            web::get().to(applications::get_my_applications),
        );

    // ── Contract routes ──
    cfg.service(
        web::scope("/contracts")
            .route("", web::get().to(contracts::get_contracts))
            .route("/{id}", web::get().to(contracts::get_contract)),
    );
    cfg.route("/contract/sign", web::post().to(contracts::sign_contract))
        .route("/contract/payment", web::post().to(contracts::mark_payment));

    // ── Review routes ──
    cfg.route("/review", web::post().to(reviews::create_review))
        .route("/reviews/{user_id}", web::get().to(reviews::get_reviews))
        .route("/ratings/{user_id}", web::get().to(reviews::get_rating));

    // ── Notification routes ──
    cfg.route(
        "/notifications",
        web::get().to(notifications::get_notifications),
    )
    .route("/notifications/{id}", web::patch().to(notifications::mark_read));

    // ── Admin routes ──
    cfg.service(
        web::scope("/admin")
            .route("/trainers", web::get().to(admin::get_trainers))
            .route("/colleges", web::get().to(admin::get_colleges))
            .route(
                "/approve-trainer/{trainer_id}",
                web::patch().to(admin::approve_trainer),
            )
            .route("/block-user/{user_id}", web::patch().to(admin::block_user))
            .route("/statistics", web::get().to(admin::statistics)),
    );
}
