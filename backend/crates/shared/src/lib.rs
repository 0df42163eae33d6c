//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Common primitive value objects (ID types, etc.)
//! - Cross-cutting validation rules and the command validation pipeline
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod error_list;
    pub mod kind;
    #[cfg(feature = "axum")]
    pub mod problem;
}
pub mod id;
pub mod validation;
