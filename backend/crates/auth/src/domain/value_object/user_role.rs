use serde::{Deserialize, Serialize};
use std::fmt;

/// Marketplace role, chosen at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Buyer = 0,
    Seller = 1,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Wire-format code, matching the values clients send and receive
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Buyer => "Buyer",
            UserRole::Seller => "Seller",
        }
    }

    #[inline]
    pub const fn is_seller(&self) -> bool {
        matches!(self, UserRole::Seller)
    }

    #[inline]
    pub const fn is_buyer(&self) -> bool {
        matches!(self, UserRole::Buyer)
    }

    /// Map a stored role id back to the enum. Storage only ever holds
    /// ids produced by [`UserRole::id`].
    #[inline]
    pub fn from_id(id: i16) -> Self {
        match id {
            0 => UserRole::Buyer,
            1 => UserRole::Seller,
            _ => {
                tracing::error!("Invalid UserRole id: {}", id);
                unreachable!("Invalid UserRole id: {}", id)
            }
        }
    }

    /// Parse a client-supplied role code (case-insensitive)
    #[inline]
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "buyer" => Some(UserRole::Buyer),
            "seller" => Some(UserRole::Seller),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
