//! Email Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MAX_EMAIL_LENGTH: usize = 200;

/// Email validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email must not be empty")]
    Empty,

    #[error("Email must be at most {MAX_EMAIL_LENGTH} characters")]
    TooLong,

    #[error("Email format is invalid")]
    InvalidFormat,
}

/// Validated email address, stored lowercase.
///
/// Validation is deliberately shallow (one `@`, non-empty local part,
/// dotted domain); the address book of record is the mail system, not us.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl Into<String>) -> Result<Self, EmailError> {
        let normalized = raw.into().trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(EmailError::Empty);
        }
        if normalized.len() > MAX_EMAIL_LENGTH {
            return Err(EmailError::TooLong);
        }

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(EmailError::InvalidFormat);
        };
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
        {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let email = Email::new("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert_eq!(Email::new(""), Err(EmailError::Empty));
        assert_eq!(Email::new("no-at-sign"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("@example.com"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("a@b"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("a@b@c.com"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("a@.com"), Err(EmailError::InvalidFormat));
    }
}
