/// Signup and login endpoints
///
/// # Endpoints
///
/// - `POST /signup` - Create an account
/// - `POST /login` - Exchange credentials for a bearer token
///
/// Tokens are issued with a fixed 1-hour lifetime and are never revoked
/// early; clients re-authenticate when a protected route answers 403.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskhive_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use uuid::Uuid;
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Display name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Signup response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    /// Confirmation message
    pub message: String,

    /// New user's ID
    pub user_id: Uuid,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed bearer token, valid for one hour
    pub token: String,
}

/// Create a new account
///
/// The password is stored only after Argon2id hashing with a per-password
/// random salt.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Persistence failure. Duplicate emails
///   surface as this same generic error, not a distinguished "already
///   registered" response (observed behavior, see DESIGN.md).
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
        },
    )
    .await
    .map_err(|e| {
        // Every persistence failure, unique-email violations included,
        // collapses into the same generic error here.
        tracing::error!("Signup insert failed: {}", e);
        ApiError::InternalError("Internal Server Error".to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

/// Exchange email and password for a bearer token
///
/// # Errors
///
/// - `400 Bad Request`: "User not found" when the email is unknown,
///   "Invalid credentials" when the password doesn't match
/// - `500 Internal Server Error`: Store or signing failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::BadRequest("User not found".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::BadRequest("Invalid credentials".to_string()));
    }

    let token = jwt::create_token(&jwt::Claims::new(user.id), state.jwt_secret())?;

    Ok(Json(LoginResponse { token }))
}
