//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;
use platform::cookie::CookieConfig;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session TTL (24 hours)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "auth_session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Cookie settings for the session cookie
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs() as i64),
        }
    }
}
