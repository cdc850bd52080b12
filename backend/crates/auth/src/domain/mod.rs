//! Domain Layer - Business logic and entities

pub mod entity;
pub mod repository;
pub mod value_object;
