//! Sign Out Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::parse_session_token;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Delete the session behind the token. Invalid tokens are ignored:
    /// sign-out is idempotent.
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        if let Some(session_id) = parse_session_token(&self.config.session_secret, session_token) {
            self.session_repo.delete(session_id).await?;
            tracing::info!(session_id = %session_id, "User signed out");
        }
        Ok(())
    }
}
