//! Authentication handlers.

use actix_web::{HttpResponse, web};

use campus_core::domain::Identity;
use campus_shared::ApiResponse;
use campus_shared::dto::{
    AuthResponse, LoginRequest, ProfileResponse, RefreshRequest, RegisterRequest,
};

use crate::middleware::{AppError, AppResult, CurrentUser};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.ra.len() != 13 || !req.ra.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(
            "RA must be exactly 13 digits".to_string(),
        ));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.name.is_empty() {
        return Err(AppError::BadRequest("Name must not be empty".to_string()));
    }
    if req.username.is_empty() {
        return Err(AppError::BadRequest(
            "Username must not be empty".to_string(),
        ));
    }
    if req.password.len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    // Hash password and create the identity
    let password_hash = state.hasher.hash(&req.password)?;
    state
        .store
        .save(Identity::new(
            req.ra,
            req.name,
            req.email,
            req.username.clone(),
            password_hash,
            req.institution_id,
        ))
        .await?;

    // Registration logs the new account straight in.
    let pair = state
        .authenticator
        .login(&req.username, &req.password)
        .await?;

    Ok(HttpResponse::Created().json(AuthResponse::bearer(pair.access_token, pair.refresh_token)))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let pair = state
        .authenticator
        .login(&req.identifier, &req.password)
        .await?;

    Ok(HttpResponse::Ok().json(AuthResponse::bearer(pair.access_token, pair.refresh_token)))
}

/// POST /api/auth/refresh
pub async fn refresh(
    state: web::Data<AppState>,
    body: web::Json<RefreshRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let pair = state.authenticator.refresh(&req.refresh_token).await?;

    Ok(HttpResponse::Ok().json(AuthResponse::bearer(pair.access_token, pair.refresh_token)))
}

/// POST /api/auth/logout
pub async fn logout(
    state: web::Data<AppState>,
    body: web::Json<RefreshRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    state.authenticator.logout(&req.refresh_token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        serde_json::json!({}),
        "Logged out",
    )))
}

/// GET /api/auth/me - Protected route
pub async fn me(user: CurrentUser) -> AppResult<HttpResponse> {
    let identity = user.0;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProfileResponse {
        id: identity.id,
        ra: identity.ra,
        name: identity.name,
        email: identity.email,
        username: identity.username,
        institution_id: identity.institution_id,
    })))
}
