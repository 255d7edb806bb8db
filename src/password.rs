//! bcrypt hashing and verification.
//!
//! The salt and cost travel inside the hash string, so verification needs
//! nothing but the stored value.

use crate::error::{Result, StoreError};
use tracing::{debug, warn};

pub use bcrypt::DEFAULT_COST;

/// bcrypt only keys on this many bytes of input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Passwords bcrypt would silently collapse onto another password: longer
/// than the key limit, or carrying NUL bytes that terminate the key.
fn check_password(password: &str) -> std::result::Result<(), &'static str> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err("longer than 72 bytes");
    }
    if password.as_bytes().contains(&0) {
        return Err("contains a NUL byte");
    }
    Ok(())
}

/// Hash `password` with a fresh random salt at the given cost.
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    check_password(password).map_err(StoreError::PasswordRejected)?;
    Ok(bcrypt::hash(password, cost)?)
}

/// Check `password` against a stored bcrypt hash.
///
/// A stored value bcrypt cannot parse counts as a mismatch, and so does a
/// password [`hash_password`] would have refused.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    if let Err(reason) = check_password(password) {
        debug!(reason, "password rejected before verification");
        return false;
    }
    match bcrypt::verify(password, stored_hash) {
        Ok(matched) => matched,
        Err(e) => {
            warn!(error = %e, "stored password hash is not a valid bcrypt hash");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn verify_round_trip() {
        let hash = hash_password("some_other_password", TEST_COST).unwrap();
        assert_ne!(hash, "some_other_password");
        assert!(verify_password("some_other_password", &hash));
        assert!(!verify_password("some_other_passwor", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("secret123", TEST_COST).unwrap();
        let b = hash_password("secret123", TEST_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        assert!(!verify_password("secret123", "not-a-hash"));
        assert!(!verify_password("secret123", ""));
        assert!(!verify_password("secret123", "secret123"));
    }

    #[test]
    fn long_passwords_are_refused() {
        let exact = "x".repeat(MAX_PASSWORD_BYTES);
        let hash = hash_password(&exact, TEST_COST).unwrap();
        assert!(verify_password(&exact, &hash));

        let longer = format!("{exact}A");
        assert!(matches!(
            hash_password(&longer, TEST_COST),
            Err(StoreError::PasswordRejected(_))
        ));
        assert!(!verify_password(&longer, &hash));
    }

    #[test]
    fn nul_bytes_are_refused() {
        let hash = hash_password("ab", TEST_COST).unwrap();
        assert!(!verify_password("ab\0ab", &hash));
        assert!(matches!(
            hash_password("ab\0", TEST_COST),
            Err(StoreError::PasswordRejected(_))
        ));
    }

    #[test]
    fn invalid_cost_is_an_error() {
        assert!(hash_password("secret123", 99).is_err());
    }
}
