//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! The trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::{NewUser, User, UserId, UserUpdate};

/// Errors surfaced by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// Store connectivity failed.
    #[error("user store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl UserStoreError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for user records.
///
/// Adapters own identifier assignment and timestamp bookkeeping: `insert`
/// allocates the next identifier and stamps both timestamps, `update` bumps
/// `updated_at` on success. All operations are asynchronous and may fail
/// with a [`UserStoreError`] that the domain service maps to its own error
/// taxonomy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Return every stored user, ordered by identifier.
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Fetch a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    /// Insert a new user, assigning its identifier and timestamps.
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserStoreError>;

    /// Apply a partial update, returning the stored record or `None` when
    /// the identifier is absent.
    async fn update(&self, id: UserId, changes: &UserUpdate)
    -> Result<Option<User>, UserStoreError>;

    /// Remove a user, returning whether a record was deleted.
    async fn delete(&self, id: UserId) -> Result<bool, UserStoreError>;
}
