//! Infrastructure Layer
//!
//! PostgreSQL persistence, the simulated ledger, and filesystem image
//! storage behind the domain traits.

pub mod images;
pub mod ledger;
pub mod postgres;
