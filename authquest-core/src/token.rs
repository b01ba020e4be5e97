//! One-time token generation for email verification and password reset

use chrono::Duration;
use rand::{Rng, TryRngCore, rngs::OsRng};

/// How long an emailed verification code stays valid.
pub const VERIFICATION_CODE_TTL: Duration = Duration::hours(24);

/// How long a password reset link stays valid.
pub const RESET_TOKEN_TTL: Duration = Duration::hours(1);

/// Generate a 6-digit verification code suitable for typing from an email.
///
/// The range excludes values below 100000 so the code never carries a
/// leading zero.
pub fn generate_verification_code() -> String {
    OsRng
        .unwrap_err()
        .random_range(100_000..=999_999u32)
        .to_string()
}

/// Generate an unguessable password reset token: 20 random bytes, hex
/// encoded, safe to embed in a URL path.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; 20];
    OsRng
        .try_fill_bytes(&mut bytes)
        .expect("OS RNG failure - system entropy source unavailable");
    hex::encode(bytes)
}
