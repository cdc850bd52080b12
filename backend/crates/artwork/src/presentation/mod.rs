//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ArtworkAppState;
pub use router::{artwork_router, artwork_router_generic};
