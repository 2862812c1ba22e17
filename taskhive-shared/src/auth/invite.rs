/// Group invite code generation
///
/// Invite codes are short public tokens permitting self-service group
/// join; they are not secrets and are stored in plaintext on the group
/// row. Format: 6 uppercase hex characters (3 random bytes), e.g.
/// "AB12C3". Uniqueness across live groups is enforced by the database's
/// unique constraint, not by the generator.

use rand::Rng;

/// Number of random bytes behind an invite code
const CODE_BYTES: usize = 3;

/// Length of a rendered invite code in characters
pub const INVITE_CODE_LENGTH: usize = CODE_BYTES * 2;

/// Generates a new invite code
///
/// 3 random bytes rendered as uppercase hex. The key space (2^24) is small
/// enough that collisions are possible; callers rely on the unique
/// constraint to reject them.
pub fn generate_invite_code() -> String {
    let mut bytes = [0u8; CODE_BYTES];
    rand::thread_rng().fill(&mut bytes);

    hex::encode(bytes).to_uppercase()
}

/// Validates invite code format
///
/// Checks length and that every character is an uppercase hex digit.
pub fn validate_invite_code_format(code: &str) -> bool {
    code.len() == INVITE_CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}
