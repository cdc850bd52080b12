//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_name::UserName, user_role::UserRole};

/// User entity
///
/// Public profile data; the password hash lives only in the repository
/// layer and never travels with this struct.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    pub email: Email,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new, not-yet-persisted user (id is assigned on insert)
    pub fn new(user_name: UserName, email: Email, user_role: UserRole) -> Self {
        Self {
            user_id: UserId::new(0),
            user_name,
            email,
            user_role,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_carries_chosen_role() {
        let user = User::new(
            UserName::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            UserRole::Seller,
        );
        assert!(user.user_role.is_seller());
        assert!(!user.user_id.is_valid());
    }
}
