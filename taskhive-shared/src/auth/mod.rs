/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Signed, time-limited bearer tokens (HS256, 1 hour)
/// - [`invite`]: Group invite code generation
/// - [`middleware`]: Request auth context and the errors the gate produces

pub mod invite;
pub mod jwt;
pub mod middleware;
pub mod password;
