/// Authentication context and gate errors
///
/// The API server's auth layer validates the bearer token on protected
/// routes and, on success, inserts an [`AuthContext`] into the request
/// extensions. Handlers extract it with axum's `Extension` extractor.
///
/// Verification is stateless: there is no revocation list and no database
/// lookup, so a token stays usable for its full lifetime regardless of
/// later password changes or account deletion.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskhive_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authentication context added to request extensions after a token
/// passes validation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID (the token's subject)
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates auth context from a validated token's subject
    pub fn from_token(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for the authentication gate
///
/// Status mapping follows the API contract: a missing credential is 401,
/// while a credential that is present but unusable (bad signature or past
/// expiry) is 403.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No bearer token in the Authorization header
    #[error("No token provided")]
    MissingCredentials,

    /// Token failed signature or format validation
    #[error("Invalid token")]
    InvalidToken(String),

    /// Token expiry has elapsed; clients should discard the credential
    /// and re-authenticate
    #[error("Token expired")]
    ExpiredToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "No token provided").into_response()
            }
            AuthError::InvalidToken(_) => (StatusCode::FORBIDDEN, "Invalid token").into_response(),
            AuthError::ExpiredToken => (StatusCode::FORBIDDEN, "Token expired").into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        let resp = AuthError::MissingCredentials.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = AuthError::InvalidToken("bad signature".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = AuthError::ExpiredToken.into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_auth_context_from_token() {
        let user_id = Uuid::new_v4();
        let ctx = AuthContext::from_token(user_id);
        assert_eq!(ctx.user_id, user_id);
    }
}
