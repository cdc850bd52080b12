//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - User registration with username + email + password, role chosen at signup
//! - Login by email and password
//! - Server-side sessions with HMAC-signed cookie tokens
//! - Role-based access (Buyer, Seller)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Sessions bound to client fingerprint (User-Agent)
//! - Session tokens carry an HMAC signature so forged ids never reach the database

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::CurrentUser;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
