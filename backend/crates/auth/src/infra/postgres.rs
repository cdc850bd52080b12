//! PostgreSQL Repository Implementations

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName, user_role::UserRole};
use crate::error::{AuthError, AuthResult};
use chrono::Utc;
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User, password_hash: &str) -> AuthResult<UserId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (username, email, password_hash, user_role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id
            "#,
        )
        .bind(user.user_name.as_str())
        .bind(user.email.as_str())
        .bind(password_hash)
        .bind(user.user_role.id())
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_unique_violation)?;

        tracing::info!(user_id = id, user_name = %user.user_name, "User row created");
        Ok(UserId::new(id))
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, email, user_role, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_with_password_by_email(
        &self,
        email: &Email,
    ) -> AuthResult<Option<(User, String)>> {
        let row = sqlx::query_as::<_, UserWithPasswordRow>(
            r#"
            SELECT user_id, username, email, password_hash, user_role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserWithPasswordRow::into_pair).transpose()
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(user_name.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

impl AuthSessionRepository for PgAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                user_id,
                user_role,
                expires_at_ms,
                client_fingerprint_hash,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id.get())
        .bind(session.user_role.id())
        .bind(session.expires_at_ms)
        .bind(&session.client_fingerprint_hash)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            session_id = %session.session_id,
            user_id = %session.user_id,
            "Auth session created"
        );
        Ok(())
    }

    async fn find_by_id(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT session_id, user_id, user_role, expires_at_ms,
                   client_fingerprint_hash, created_at, last_activity_at
            FROM auth_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                if !platform::crypto::constant_time_eq(&r.client_fingerprint_hash, fingerprint_hash)
                {
                    tracing::warn!(session_id = %session_id, "Auth session fingerprint mismatch");
                    return Err(AuthError::SessionFingerprintMismatch);
                }
                Ok(Some(r.into_session()))
            }
            None => Ok(None),
        }
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_sessions
            SET expires_at_ms = $2, last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        tracing::info!(session_id = %session_id, "Auth session deleted");
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions = deleted, "Cleaned up expired auth sessions");
        Ok(deleted)
    }
}

/// Turn a duplicate email/username insert into the matching business error
fn map_user_unique_violation(e: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return match db.constraint() {
                Some(c) if c.contains("email") => AuthError::EmailTaken,
                _ => AuthError::UserNameTaken,
            };
        }
    }
    AuthError::Database(e)
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    username: String,
    email: String,
    user_role: i16,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_name = UserName::new(self.username)
            .map_err(|e| AuthError::Internal(format!("Invalid username in storage: {e}")))?;
        let email = Email::new(self.email)
            .map_err(|e| AuthError::Internal(format!("Invalid email in storage: {e}")))?;
        Ok(User {
            user_id: UserId::new(self.user_id),
            user_name,
            email,
            user_role: UserRole::from_id(self.user_role),
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserWithPasswordRow {
    user_id: i64,
    username: String,
    email: String,
    password_hash: String,
    user_role: i16,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl UserWithPasswordRow {
    fn into_pair(self) -> AuthResult<(User, String)> {
        let password_hash = self.password_hash.clone();
        let user = UserRow {
            user_id: self.user_id,
            username: self.username,
            email: self.email,
            user_role: self.user_role,
            created_at: self.created_at,
        }
        .into_user()?;
        Ok((user, password_hash))
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    user_id: i64,
    user_role: i16,
    expires_at_ms: i64,
    client_fingerprint_hash: Vec<u8>,
    created_at: chrono::DateTime<chrono::Utc>,
    last_activity_at: chrono::DateTime<chrono::Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            session_id: self.session_id,
            user_id: UserId::new(self.user_id),
            user_role: UserRole::from_id(self.user_role),
            expires_at_ms: self.expires_at_ms,
            client_fingerprint_hash: self.client_fingerprint_hash,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}
