//! Password hashing and constant-time comparison helpers

use subtle::ConstantTimeEq;
use tokio::task;

use crate::{Error, account::PasswordHash};

/// Work factor for bcrypt. Raising this invalidates no existing hashes,
/// it only slows new ones.
pub const BCRYPT_COST: u32 = 12;

/// Hash a plaintext password with bcrypt.
///
/// The hashing runs on the blocking pool so a burst of signups does not stall
/// the async runtime.
pub async fn hash_password(password: &str) -> Result<PasswordHash, Error> {
    let password = password.to_string();
    let hash = task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| Error::Hashing(e.to_string()))?
        .map_err(|e| Error::Hashing(e.to_string()))?;
    Ok(PasswordHash::new(hash))
}

/// Verify a plaintext password against a stored hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only for infrastructure failures
/// such as a malformed stored hash.
pub async fn verify_password(hash: &PasswordHash, password: &str) -> Result<bool, Error> {
    let hash = hash.as_str().to_string();
    let password = password.to_string();
    task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| Error::Hashing(e.to_string()))?
        .map_err(|e| Error::Hashing(e.to_string()))
}

/// Compare two byte slices in constant time.
///
/// Used to re-check token material fetched from storage, since a lookup may
/// match more loosely than byte equality (case-insensitive collation).
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").await.unwrap();
        assert!(hash.as_str().starts_with("$2"));

        assert!(verify_password(&hash, "correct horse battery").await.unwrap());
        assert!(!verify_password(&hash, "wrong password").await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("same password").await.unwrap();
        let b = hash_password("same password").await.unwrap();
        assert_ne!(a.as_str(), b.as_str());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        let result = verify_password(&PasswordHash::new("not a bcrypt hash"), "pw").await;
        assert!(matches!(result, Err(Error::Hashing(_))));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare(b"abc123", b"abc123"));
        assert!(!constant_time_compare(b"abc123", b"abc124"));
        assert!(!constant_time_compare(b"abc123", b"abc12"));
    }
}
