//! Application Layer
//!
//! Use cases, their validators and application configuration.

pub mod authenticate_user;
pub mod config;
pub mod register_user;
pub mod validators;

// Re-exports
pub use authenticate_user::{AuthenticateUserCommand, AuthenticateUserUseCase, AuthenticatedUser};
pub use config::IdentityConfig;
pub use register_user::{RegisterUserCommand, RegisterUserUseCase, RegisteredUser};
pub use validators::{AuthenticateUserValidator, RegisterUserValidator};
