//! In-memory user store adapter.
//!
//! Backs the [`UserStore`] port with a `BTreeMap` guarded by an async
//! read-write lock. Identifiers come from an auto-incrementing sequence and
//! timestamps are stamped on insert and bumped on update, so the adapter
//! behaves like a real mutable store and any relational or key-value backend
//! can replace it behind the same port.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{NewUser, User, UserId, UserUpdate};

/// Mutable in-memory user collection.
#[derive(Debug)]
pub struct InMemoryUserStore {
    users: RwLock<BTreeMap<i64, User>>,
    next_id: AtomicI64,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    /// Create an empty store whose first assigned identifier is `1`.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id.get()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn insert(&self, new_user: &NewUser) -> Result<User, UserStoreError> {
        let raw_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let id = UserId::new(raw_id)
            .map_err(|err| UserStoreError::query(format!("id sequence produced {raw_id}: {err}")))?;
        let now = Utc::now();
        let user = User {
            id,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            age: new_user.age,
            created_at: now,
            updated_at: now,
        };

        let mut users = self.users.write().await;
        users.insert(id.get(), user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserUpdate,
    ) -> Result<Option<User>, UserStoreError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id.get()) else {
            return Ok(None);
        };

        if let Some(name) = &changes.name {
            user.name = name.clone();
        }
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        if let Some(age) = changes.age {
            user.age = age;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserStoreError> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id.get()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> NewUser {
        NewUser {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            age: 36,
        }
    }

    fn grace() -> NewUser {
        NewUser {
            name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            age: 45,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_identifiers() {
        let store = InMemoryUserStore::new();
        let first = store.insert(&ada()).await.expect("insert");
        let second = store.insert(&grace()).await.expect("insert");
        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn find_all_returns_users_in_id_order() {
        let store = InMemoryUserStore::new();
        store.insert(&ada()).await.expect("insert");
        store.insert(&grace()).await.expect("insert");

        let users = store.find_all().await.expect("list");
        let ids: Vec<i64> = users.iter().map(|user| user.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn find_by_email_matches_exactly() {
        let store = InMemoryUserStore::new();
        store.insert(&ada()).await.expect("insert");

        let found = store
            .find_by_email("ada@example.com")
            .await
            .expect("lookup");
        assert!(found.is_some());
        let missing = store.find_by_email("ADA@example.com").await.expect("lookup");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn update_mutates_persisted_state() {
        let store = InMemoryUserStore::new();
        let user = store.insert(&ada()).await.expect("insert");

        let changes = UserUpdate {
            name: Some("Ada King".into()),
            age: Some(37),
            ..UserUpdate::default()
        };
        let updated = store
            .update(user.id, &changes)
            .await
            .expect("update")
            .expect("user exists");
        assert_eq!(updated.name, "Ada King");
        assert_eq!(updated.age, 37);
        assert_eq!(updated.email, "ada@example.com");
        assert!(updated.updated_at >= updated.created_at);

        let fetched = store
            .find_by_id(user.id)
            .await
            .expect("lookup")
            .expect("user exists");
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn update_missing_user_returns_none() {
        let store = InMemoryUserStore::new();
        let id = UserId::new(99).expect("positive id");
        let result = store.update(id, &UserUpdate::default()).await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn delete_removes_the_record_once() {
        let store = InMemoryUserStore::new();
        let user = store.insert(&ada()).await.expect("insert");

        assert!(store.delete(user.id).await.expect("delete"));
        assert!(!store.delete(user.id).await.expect("second delete"));
        assert!(store
            .find_by_id(user.id)
            .await
            .expect("lookup")
            .is_none());
    }
}
