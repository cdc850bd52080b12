//! Artwork Registration & Marketplace Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database / ledger / image storage implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Integrity Model
//! - The SHA-256 content hash is computed server-side from the uploaded bytes
//!   and is the sole identity of an artwork; client-reported hashes are never trusted
//! - One registration per content hash, enforced both in the use case and by a
//!   unique database constraint
//! - Ledger anchoring and payments run against a local simulated ledger; the
//!   database relational record is the source of truth for ownership

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ArtworkConfig;
pub use error::{ArtworkError, ArtworkResult};
pub use infra::images::ImageStore;
pub use infra::ledger::SimulatedLedger;
pub use infra::postgres::PgArtworkRepository;
pub use presentation::router::artwork_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
