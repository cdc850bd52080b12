//! Sign In Use Case
//!
//! Verifies credentials and opens a server-side session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::sign_session_token;
use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use platform::password::{RawPassword, verify_password};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user: User,
    /// Session token for cookie
    pub session_token: String,
    pub expires_at_ms: i64,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository + AuthSessionRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository + AuthSessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        fingerprint_hash: Vec<u8>,
    ) -> AuthResult<SignInOutput> {
        // A malformed email can never match an account; collapse it into
        // the same answer as a wrong password.
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .repo
            .find_with_password_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;
        if !verify_password(&raw_password, &password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let session = AuthSession::new(
            user.user_id,
            user.user_role,
            fingerprint_hash,
            self.config.session_ttl,
        );
        AuthSessionRepository::create(self.repo.as_ref(), &session).await?;

        let session_token = sign_session_token(&self.config.session_secret, session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed in"
        );

        Ok(SignInOutput {
            user,
            session_token,
            expires_at_ms: session.expires_at_ms,
        })
    }
}
