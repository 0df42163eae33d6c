//! User Entity
//!
//! Registered account. Created once at registration and never mutated.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_id::UserId};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// UUID v4 generated at registration
    pub id: UserId,
    pub name: String,
    /// Lowercase form; unique across users
    pub email: Email,
    /// Opaque PHC string produced by the password hasher
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id
    pub fn new(name: String, email: Email, password_hash: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            name,
            email,
            password_hash,
            created_at,
        }
    }
}
