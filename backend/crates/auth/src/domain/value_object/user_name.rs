//! Username Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 100;

/// Username validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserNameError {
    #[error("Username must be at least {MIN_USERNAME_LENGTH} characters")]
    TooShort,

    #[error("Username must be at most {MAX_USERNAME_LENGTH} characters")]
    TooLong,

    #[error("Username may only contain letters, digits, '_', '-' and '.'")]
    InvalidCharacter,
}

/// Validated username. Trimmed on construction; uniqueness is enforced
/// by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl Into<String>) -> Result<Self, UserNameError> {
        let trimmed = raw.into().trim().to_string();

        let len = trimmed.chars().count();
        if len < MIN_USERNAME_LENGTH {
            return Err(UserNameError::TooShort);
        }
        if len > MAX_USERNAME_LENGTH {
            return Err(UserNameError::TooLong);
        }
        if !trimmed
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(UserNameError::InvalidCharacter);
        }

        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_trims_reasonable_names() {
        assert_eq!(UserName::new("  alice  ").unwrap().as_str(), "alice");
        assert!(UserName::new("bob_the-3rd.art").is_ok());
    }

    #[test]
    fn rejects_out_of_range_lengths() {
        assert_eq!(UserName::new("ab"), Err(UserNameError::TooShort));
        assert_eq!(
            UserName::new("x".repeat(MAX_USERNAME_LENGTH + 1)),
            Err(UserNameError::TooLong)
        );
    }

    #[test]
    fn rejects_forbidden_characters() {
        assert_eq!(
            UserName::new("alice smith"),
            Err(UserNameError::InvalidCharacter)
        );
        assert_eq!(
            UserName::new("alice@home"),
            Err(UserNameError::InvalidCharacter)
        );
    }
}
