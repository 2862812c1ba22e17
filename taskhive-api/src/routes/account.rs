/// Self-service account endpoints
///
/// # Endpoints
///
/// - `GET /account` - Current name and email
/// - `PUT /account/update` - Overwrite name and email
/// - `PUT /account/password` - Change password (re-authenticates with the
///   old one)
/// - `DELETE /account/delete` - Delete the account row
///
/// All routes require a valid bearer token. Deletion removes only the
/// user row; owned tasks and memberships are left behind as orphans
/// (accepted design, see DESIGN.md).

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use taskhive_shared::{
    auth::{middleware::AuthContext, password},
    models::user::User,
};
use validator::Validate;

/// Account profile response
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

/// Profile update request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Password change request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password, re-verified before any change
    pub old_password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Generic confirmation response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Get the caller's name and email
pub async fn get_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<AccountResponse>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(AccountResponse {
        name: user.name,
        email: user.email,
    }))
}

/// Overwrite the caller's name and email
///
/// Both fields are written unconditionally. Email uniqueness is enforced
/// only by the store's constraint.
pub async fn update_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateAccountRequest>,
) -> ApiResult<Json<MessageResponse>> {
    req.validate()?;

    User::update_profile(&state.db, auth.user_id, &req.name, &req.email).await?;

    Ok(Json(MessageResponse {
        message: "User information updated successfully".to_string(),
    }))
}

/// Change the caller's password
///
/// The request re-authenticates with the current password even though the
/// bearer token already proved identity.
///
/// # Errors
///
/// - `400 Bad Request`: "Old password is incorrect"
/// - `404 Not Found`: Account row vanished between auth and lookup
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    req.validate()?;

    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let matches = password::verify_password(&req.old_password, &user.password_hash)?;
    if !matches {
        return Err(ApiError::BadRequest("Old password is incorrect".to_string()));
    }

    let new_hash = password::hash_password(&req.new_password)?;
    User::update_password(&state.db, auth.user_id, &new_hash).await?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}

/// Delete the caller's account
///
/// Removes only the user row; no transactional cleanup of owned tasks or
/// memberships. Any still-live token keeps working until it expires.
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<MessageResponse>> {
    User::delete(&state.db, auth.user_id).await?;

    Ok(Json(MessageResponse {
        message: "Account deleted successfully".to_string(),
    }))
}
