//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the capability
//! traits the use cases depend on.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::user::User;
pub use repository::UserStore;
pub use services::{Clock, PasswordHasher, SystemClock, TokenIssuer};
