/// Bearer token generation and validation
///
/// Tokens are signed with HS256 and carry the user's identity. There is a
/// single token kind with a fixed 1-hour lifetime; expiry is the only
/// invalidation mechanism. A token issued at login stays valid for its
/// full lifetime even if the password changes or the account is deleted
/// afterwards.
///
/// # Example
///
/// ```
/// use taskhive_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "your-secret-key-at-least-32-bytes!!";
///
/// let token = create_token(&Claims::new(user_id), secret)?;
/// let claims = validate_token(&token, secret)?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed token lifetime: one hour from issuance
pub const TOKEN_LIFETIME: Duration = Duration::hours(1);

/// Issuer embedded in and required of every token
const ISSUER: &str = "taskhive";

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token failed signature or structural validation
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    ///
    /// Distinguished from other validation failures so the gate can tell
    /// clients to discard the credential and log in again.
    #[error("Token has expired")]
    Expired,
}

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the authenticated user's ID
    pub sub: Uuid,

    /// Issuer - always "taskhive"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a user with the fixed 1-hour expiry
    pub fn new(user_id: Uuid) -> Self {
        Self::with_expiration(user_id, TOKEN_LIFETIME)
    }

    /// Creates claims with a custom expiry (used by tests to mint
    /// already-expired tokens)
    pub fn with_expiration(user_id: Uuid, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed token from claims
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and extracts its claims
///
/// Verifies the signature, the expiry timestamp, and the issuer.
///
/// # Errors
///
/// Returns `JwtError::Expired` for an elapsed expiry, otherwise
/// `JwtError::ValidationError` for any signature/format/issuer problem.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_create_and_validate_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(&Claims::new(user_id), SECRET).unwrap();

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "taskhive");
    }

    #[test]
    fn test_token_lifetime_is_one_hour() {
        let claims = Claims::new(Uuid::new_v4());
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::with_expiration(Uuid::new_v4(), Duration::hours(-1));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).unwrap();
        match validate_token(&token, SECRET) {
            Err(JwtError::Expired) => {}
            other => panic!("Expected Expired, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(&Claims::new(Uuid::new_v4()), SECRET).unwrap();

        match validate_token(&token, "a-different-secret-that-is-32-bytes") {
            Err(JwtError::ValidationError(_)) => {}
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            validate_token("not.a.token", SECRET),
            Err(JwtError::ValidationError(_))
        ));
    }
}
