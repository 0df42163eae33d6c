//! Domain Services
//!
//! Capabilities the identity use cases depend on. Implementations live in
//! `infra/`; tests substitute small hand-written doubles.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::IdentityResult;

/// Password hashing and verification
///
/// `hash` must salt every call independently, so hashing the same plaintext
/// twice yields different outputs. `verify` returns `Ok(false)` for a wrong
/// password or an unparseable hash; `Err` is reserved for infrastructure
/// faults.
#[trait_variant::make(PasswordHasher: Send)]
pub trait LocalPasswordHasher {
    async fn hash(&self, plaintext: &str) -> IdentityResult<String>;

    async fn verify(&self, plaintext: &str, hash: &str) -> IdentityResult<bool>;
}

/// Bearer token issuance (local, synchronous signing)
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, subject: &UserId, email: &Email) -> IdentityResult<String>;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
