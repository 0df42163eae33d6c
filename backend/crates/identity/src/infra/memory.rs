//! In-memory user store
//!
//! Process-local store keyed by normalized email. Used when no database is
//! configured, and by tests.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserStore;
use crate::domain::value_object::email::Email;
use crate::error::{IdentityError, IdentityResult};

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Email, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserStore for InMemoryUserStore {
    async fn exists_by_normalized_email(&self, email: &Email) -> IdentityResult<bool> {
        Ok(self.users.read().await.contains_key(email))
    }

    async fn find_by_normalized_email(&self, email: &Email) -> IdentityResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert(&self, user: &User) -> IdentityResult<()> {
        // Check and insert under one write lock
        match self.users.write().await.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(IdentityError::EmailAlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(email: &str) -> User {
        User::new(
            "Ana".to_string(),
            Email::normalize(email),
            "hash".to_string(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = InMemoryUserStore::new();
        let ana = user("ana@x.com");
        store.insert(&ana).await.unwrap();

        let email = Email::normalize("ANA@X.COM");
        assert!(store.exists_by_normalized_email(&email).await.unwrap());
        let found = store.find_by_normalized_email(&email).await.unwrap().unwrap();
        assert_eq!(found.id, ana.id);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_conflict() {
        let store = InMemoryUserStore::new();
        store.insert(&user("ana@x.com")).await.unwrap();

        let result = store.insert(&user("Ana@X.com")).await;
        assert!(matches!(result, Err(IdentityError::EmailAlreadyExists)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let store = InMemoryUserStore::new();
        let email = Email::normalize("nobody@x.com");
        assert!(!store.exists_by_normalized_email(&email).await.unwrap());
        assert!(store.find_by_normalized_email(&email).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
