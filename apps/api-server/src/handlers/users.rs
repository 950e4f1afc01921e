//! Account management handlers.

use actix_web::{HttpResponse, web};

use campus_shared::ApiResponse;
use campus_shared::dto::ChangePasswordRequest;

use crate::middleware::{AppError, AppResult, CurrentUser};
use crate::state::AppState;

/// PUT /api/users/password
pub async fn change_password(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.new_password.len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    // Re-verify the current password before accepting a new one.
    if !state
        .hasher
        .verify(&req.current_password, &user.0.password_hash)
    {
        return Err(AppError::Unauthorized);
    }

    let password_hash = state.hasher.hash(&req.new_password)?;
    state
        .store
        .update_password(&user.0.ra, &password_hash)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        serde_json::json!({}),
        "Password updated",
    )))
}

/// DELETE /api/users
pub async fn delete_account(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> AppResult<HttpResponse> {
    state.store.delete(&user.0.ra).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        serde_json::json!({ "deleted_ra": user.0.ra }),
        "Account deleted",
    )))
}
