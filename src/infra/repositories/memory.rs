//! In-process user store.
//!
//! Keeps users in a map keyed by email. Used by `serve --store memory` and by
//! the integration tests.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UserRepository;
use crate::config::CONFLICT_EMAIL;
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

/// Map-backed repository; uniqueness is checked and enforced under one write lock.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;

        match users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(CONFLICT_EMAIL)),
            Entry::Vacant(slot) => Ok(slot.insert(user.into_user()).clone()),
        }
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Password;
    use crate::errors::ErrorKind;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            username: "alice".to_string(),
            email: email.to_string(),
            password_hash: Password::from_hash("$argon2id$stub".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = MemoryUserStore::new();
        let created = store.insert(new_user("a@x.com")).await.unwrap();

        let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.username, "alice");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryUserStore::new();
        store.insert(new_user("a@x.com")).await.unwrap();

        let err = store.insert(new_user("a@x.com")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_email_lookup_is_exact() {
        let store = MemoryUserStore::new();
        store.insert(new_user("a@x.com")).await.unwrap();

        assert!(store.find_by_email("A@x.com").await.unwrap().is_none());
        assert!(store.find_by_email("nobody@x.com").await.unwrap().is_none());
    }
}
