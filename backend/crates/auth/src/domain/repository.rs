//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::AuthResult;
use kernel::id::UserId;
use uuid::Uuid;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user with their password hash; returns the assigned id.
    /// A concurrent duplicate surfaces as EmailTaken / UserNameTaken via
    /// the unique indexes.
    async fn create(&self, user: &User, password_hash: &str) -> AuthResult<UserId>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find user and their password hash by email (login lookup)
    async fn find_with_password_by_email(
        &self,
        email: &Email,
    ) -> AuthResult<Option<(User, String)>>;

    /// Check if a username is taken
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Check if an email is registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Create a new session
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by ID and verify fingerprint
    async fn find_by_id(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>>;

    /// Update session (e.g., last activity)
    async fn update(&self, session: &AuthSession) -> AuthResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
