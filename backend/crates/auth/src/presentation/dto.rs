//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// "Buyer" or "Seller"; defaults to Buyer when absent
    pub role: Option<String>,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// User Info
// ============================================================================

/// User info embedded in auth responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UserDto {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.user_id.get(),
            username: user.user_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.user_role.code().to_string(),
            created_at: user.created_at,
        }
    }
}

/// Register / login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserDto,
    pub expires_at_ms: i64,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub user_id: Option<i64>,
    pub user_role: Option<String>,
    pub expires_at_ms: Option<i64>,
}

impl SessionStatusResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user_id: None,
            user_role: None,
            expires_at_ms: None,
        }
    }
}
