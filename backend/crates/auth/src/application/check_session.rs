//! Check Session Use Case
//!
//! Verifies and retrieves session information.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::parse_session_token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Just check if the session is valid (returns bool)
    pub async fn is_valid(&self, session_token: &str, fingerprint_hash: &[u8]) -> bool {
        self.get_session(session_token, fingerprint_hash)
            .await
            .is_ok()
    }

    /// Get the session and update last activity
    pub async fn get_session(
        &self,
        session_token: &str,
        fingerprint_hash: &[u8],
    ) -> AuthResult<AuthSession> {
        let session_id = parse_session_token(&self.config.session_secret, session_token)
            .ok_or(AuthError::SessionInvalid)?;

        let session = self
            .session_repo
            .find_by_id(session_id, fingerprint_hash)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        let mut session = session;
        session.touch();

        // Update last activity in the background
        let session_clone = session.clone();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update(&session_clone).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(session)
    }
}
