//! Email Value Object
//!
//! Normalized (lowercase) email address. Format rules are enforced by the
//! request validators before a command reaches a handler; this type only
//! fixes the canonical form used for storage, lookup and uniqueness.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Normalized email address
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Normalize raw input to its canonical lowercase form
    pub fn normalize(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().to_lowercase())
    }

    /// Create from database value (already normalized)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }

    /// Get the domain part of the email
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
