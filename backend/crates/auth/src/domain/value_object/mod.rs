//! Domain Value Objects

pub mod email;
pub mod user_name;
pub mod user_role;
