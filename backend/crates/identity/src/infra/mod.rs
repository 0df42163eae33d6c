//! Infrastructure Layer
//!
//! Store implementations and credential adapters.

pub mod credentials;
pub mod memory;
pub mod postgres;

pub use credentials::{Argon2PasswordHasher, JwtTokenIssuer};
pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;
