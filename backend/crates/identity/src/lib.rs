//! Identity Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, store and capability traits
//! - `application/` - Use cases, validators and configuration
//! - `infra/` - Store implementations and credential adapters
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with name, email and password
//! - Authentication with email and password
//! - HS256 bearer token issued on both
//!
//! ## Security Model
//! - Passwords hashed with Argon2id off the async executor
//! - Emails stored and matched in lowercase; uniqueness enforced by the store
//! - Unexpected faults are logged and returned as a generic 500

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use error::{IdentityError, IdentityResult};
pub use infra::{InMemoryUserStore, PgUserStore};
pub use presentation::router::{identity_router, identity_router_with_state};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::AppError,
    error_list::{AppResult, ErrorList},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}
