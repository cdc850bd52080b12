//! Application Layer - Use Cases

pub mod check_session;
pub mod config;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod token;

pub use check_session::CheckSessionUseCase;
pub use sign_in::SignInUseCase;
pub use sign_out::SignOutUseCase;
pub use sign_up::SignUpUseCase;
