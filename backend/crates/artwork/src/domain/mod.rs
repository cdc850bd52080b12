//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Artwork, LedgerRecord, PurchaseRecord)
//! - Domain value objects (ContentHash, LedgerAccount)
//! - Domain services (content hashing, perceptual hash placeholder)
//! - Repository and ledger traits (interfaces)

pub mod entities;
pub mod ledger;
pub mod repository;
pub mod services;
pub mod value_objects;
