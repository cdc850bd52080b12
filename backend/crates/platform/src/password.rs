//! Password Hashing and Verification
//!
//! Argon2id hashing (memory-hard, recommended by OWASP) with zeroization
//! of clear-text material and NFKC normalization so visually identical
//! passwords verify regardless of Unicode composition.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum password length (NIST SP 800-63B: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (NIST SP 800-63B: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

/// Clear text password with automatic memory zeroization
///
/// Validated against the password policy on construction and NFKC
/// normalized. Does not implement `Clone`; Debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct RawPassword(String);

impl RawPassword {
    /// Validate and normalize a user-supplied password
    pub fn new(password: impl Into<String>) -> Result<Self, PasswordPolicyError> {
        let mut password: String = password.into();
        let normalized: String = password.nfkc().collect();
        password.zeroize();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }
        if normalized.chars().any(char::is_control) {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        let len = normalized.chars().count();
        if len < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: len,
            });
        }
        if len > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: len,
            });
        }

        Ok(Self(normalized))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RawPassword(***)")
    }
}

/// Hash a password with Argon2id, producing a PHC-format string
pub fn hash_password(password: &RawPassword) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-format hash
pub fn verify_password(password: &RawPassword, stored: &str) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(stored).map_err(|_| PasswordHashError::InvalidHashFormat)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_too_short() {
        assert!(matches!(
            RawPassword::new("short"),
            Err(PasswordPolicyError::TooShort { .. })
        ));
    }

    #[test]
    fn test_policy_whitespace_only() {
        assert!(matches!(
            RawPassword::new("        "),
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_policy_control_characters() {
        assert!(matches!(
            RawPassword::new("pass\x00word123"),
            Err(PasswordPolicyError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let password = RawPassword::new("correct horse battery").unwrap();
        let hash = hash_password(&password).unwrap();

        assert!(verify_password(&password, &hash).unwrap());

        let wrong = RawPassword::new("incorrect horse").unwrap();
        assert!(!verify_password(&wrong, &hash).unwrap());
    }

    #[test]
    fn test_invalid_hash_format() {
        let password = RawPassword::new("correct horse battery").unwrap();
        assert!(matches!(
            verify_password(&password, "not-a-phc-hash"),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = RawPassword::new("super secret pw").unwrap();
        assert_eq!(format!("{:?}", password), "RawPassword(***)");
    }
}
