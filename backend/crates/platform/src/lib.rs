//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256 content hashing, hex encoding)
//! - Password hashing (Argon2id)
//! - Cookie management
//! - Client identification
//! - In-memory TTL cache for read-through caching

pub mod cache;
pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
