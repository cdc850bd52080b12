//! Sign Up Use Case
//!
//! Creates a new user account and logs them straight in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::sign_session_token;
use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName, user_role::UserRole};
use crate::error::{AuthError, AuthResult};
use platform::password::{RawPassword, hash_password};

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
    /// Session token for cookie
    pub session_token: String,
    pub expires_at_ms: i64,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository + AuthSessionRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository + AuthSessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        input: SignUpInput,
        fingerprint_hash: Vec<u8>,
    ) -> AuthResult<SignUpOutput> {
        let user_name =
            UserName::new(input.user_name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        let role = match input.role.as_deref().filter(|r| !r.is_empty()) {
            Some(code) => UserRole::parse(code)
                .ok_or_else(|| AuthError::Validation(format!("Unknown role: {code}")))?,
            None => UserRole::default(),
        };

        if UserRepository::exists_by_email(self.repo.as_ref(), &email).await? {
            return Err(AuthError::EmailTaken);
        }
        if UserRepository::exists_by_user_name(self.repo.as_ref(), &user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = hash_password(&raw_password)?;

        let mut user = User::new(user_name, email, role);
        user.user_id = UserRepository::create(self.repo.as_ref(), &user, &password_hash).await?;

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
            role = %user.user_role,
            "User signed up"
        );

        Ok(SignUpOutput {
            user,
            session_token,
            expires_at_ms: session.expires_at_ms,
        })
    }
}
