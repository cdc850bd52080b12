//! Auth Session Entity
//!
//! Represents an authenticated user session.
//! Stored in database with cookie-based token reference.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::value_object::user_role::UserRole;

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Reference to User
    pub user_id: UserId,
    /// User role at session creation
    pub user_role: UserRole,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Client fingerprint hash (User-Agent based)
    pub client_fingerprint_hash: Vec<u8>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session.
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(
        user_id: UserId,
        user_role: UserRole,
        fingerprint_hash: Vec<u8>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            user_id,
            user_role,
            expires_at_ms: now.timestamp_millis() + ttl.as_millis() as i64,
            client_fingerprint_hash: fingerprint_hash,
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }
}
