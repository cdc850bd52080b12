//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod config;
pub mod download;
pub mod listing;
pub mod purchase;
pub mod queries;
pub mod seller_stats;
pub mod upload;
pub mod verify;
