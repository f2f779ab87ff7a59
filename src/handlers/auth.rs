use actix_web::{HttpRequest, HttpResponse, Responder, web};
use sea_orm::{DatabaseConnection, DbErr};

use crate::auth::middleware::AuthenticatedUser;
use crate::auth::password;
use crate::auth::session::{self, SESSION_COOKIE};
use crate::db::users as user_db;
use crate::models::users::{LoginRequest, NewUser, RegisterRequest, UpdateProfile, UserResponse};

/// POST /api/register — create an account and log the new user in.
pub async fn register(
    db: web::Data<DatabaseConnection>,
    body: web::Json<RegisterRequest>,
) -> impl Responder {
    let RegisterRequest {
        username,
        password,
        name,
        email,
        role,
        skills,
        bio,
        organization,
    } = body.into_inner();

    // 1. Required fields, checked one at a time so the client learns which
    //    one is missing. Empty strings count as missing.
    let Some(username) = username.filter(|v| !v.is_empty()) else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Missing required field: username",
        }));
    };
    let Some(password) = password.filter(|v| !v.is_empty()) else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Missing required field: password",
        }));
    };
    let Some(email) = email.filter(|v| !v.is_empty()) else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Missing required field: email",
        }));
    };
    let Some(name) = name.filter(|v| !v.is_empty()) else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Missing required field: name",
        }));
    };
    let Some(role) = role else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Missing required field: role",
        }));
    };

    // 2. Usernames and emails are unique.
    match user_db::get_user_by_username(db.get_ref(), &username).await {
        Ok(Some(_)) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Username already exists",
            }));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to check username: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Registration failed due to server error",
            }));
        }
    }

    match user_db::get_user_by_email(db.get_ref(), &email).await {
        Ok(Some(_)) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Email already exists",
            }));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to check email: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Registration failed due to server error",
            }));
        }
    }

    // 3. Hash the password before it goes anywhere near the database.
    let password_hash = match password::hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Registration failed due to server error",
            }));
        }
    };

    let new_user = NewUser {
        username,
        password_hash,
        name,
        email,
        role,
        skills: skills.map(|s| s.into_vec()).unwrap_or_default(),
        bio,
        organization,
    };

    let user = match user_db::insert_user(db.get_ref(), new_user).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to create user: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Registration failed due to server error",
            }));
        }
    };

    // 4. Log the new account in right away.
    match session::create_session(db.get_ref(), user.id).await {
        Ok(new_session) => HttpResponse::Created()
            .cookie(session::session_cookie(&new_session))
            .json(UserResponse::from(user)),
        Err(e) => {
            tracing::error!("Failed to create session: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Registration failed due to server error",
            }))
        }
    }
}

/// POST /api/login — verify credentials and start a session.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    body: web::Json<LoginRequest>,
) -> impl Responder {
    let input = body.into_inner();

    // The same message covers both an unknown username and a wrong password,
    // so the endpoint cannot be used to probe which usernames exist.
    let user = match user_db::get_user_by_username(db.get_ref(), &input.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "message": "Invalid username or password",
            }));
        }
        Err(e) => {
            tracing::error!("Failed to fetch user: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Login failed due to server error",
            }));
        }
    };

    if !password::verify_password(&input.password, &user.password_hash) {
        return HttpResponse::Unauthorized().json(serde_json::json!({
            "message": "Invalid username or password",
        }));
    }

    match session::create_session(db.get_ref(), user.id).await {
        Ok(new_session) => HttpResponse::Ok()
            .cookie(session::session_cookie(&new_session))
            .json(UserResponse::from(user)),
        Err(e) => {
            tracing::error!("Failed to create session: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Login failed due to server error",
            }))
        }
    }
}

/// POST /api/logout — end the session. Safe to call when not logged in.
pub async fn logout(req: HttpRequest, db: web::Data<DatabaseConnection>) -> impl Responder {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return HttpResponse::Ok().json(serde_json::json!({
            "message": "Not logged in",
        }));
    };

    if let Err(e) = session::destroy_session(db.get_ref(), cookie.value()).await {
        tracing::error!("Failed to delete session: {e}");
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "message": "Logout failed due to server error",
        }));
    }

    HttpResponse::Ok()
        .cookie(session::clear_session_cookie())
        .json(serde_json::json!({
            "message": "Logged out successfully",
        }))
}

/// GET /api/user and GET /api/profile — return the logged-in user.
pub async fn current_user(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}

/// PATCH /api/profile/update — partial update of the caller's own profile.
pub async fn update_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpdateProfile>,
) -> impl Responder {
    match user_db::update_profile(db.get_ref(), user.0.id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(UserResponse::from(updated)),
        Err(DbErr::RecordNotFound(_)) => HttpResponse::NotFound().json(serde_json::json!({
            "message": "User not found",
        })),
        Err(e) => {
            tracing::error!("Failed to update profile: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to update profile",
            }))
        }
    }
}
