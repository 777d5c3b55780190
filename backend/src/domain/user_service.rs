//! User domain service.
//!
//! Thin, stateless operations over the [`UserStore`] port. Each call either
//! returns an entity (or collection) or raises an [`AppError`] from the
//! application taxonomy; store faults are logged server-side and mapped to
//! the generic database error so adapter details never reach clients.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{AppError, NewUser, User, UserId, UserUpdate};

/// Domain service executing user lookups and mutations.
pub struct UserService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ?Sized> UserService<S> {
    /// Create a service backed by the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> UserService<S>
where
    S: UserStore + ?Sized,
{
    /// Return every stored user.
    ///
    /// An empty store is not a failure for the list operation; it yields an
    /// empty collection.
    pub async fn find_all(&self) -> Result<Vec<User>, AppError> {
        info!("listing users");
        let users = self.store.find_all().await.map_err(map_store_error)?;
        if users.is_empty() {
            warn!("no users in the store");
        } else {
            info!(count = users.len(), "users found");
        }
        Ok(users)
    }

    /// Fetch one user by identifier, raising the not-found error when the
    /// identifier is absent.
    pub async fn find_by_id(&self, id: UserId) -> Result<User, AppError> {
        info!(user_id = %id, "fetching user");
        match self.store.find_by_id(id).await.map_err(map_store_error)? {
            Some(user) => {
                info!(user_id = %id, name = %user.name, "user found");
                Ok(user)
            }
            None => {
                warn!(user_id = %id, "user not found");
                Err(AppError::user_not_found())
            }
        }
    }

    /// Create a user, rejecting an email that is already registered.
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        info!(email = %new_user.email, "creating user");
        let existing = self
            .store
            .find_by_email(&new_user.email)
            .await
            .map_err(map_store_error)?;
        if existing.is_some() {
            warn!(email = %new_user.email, "email already registered");
            return Err(AppError::user_already_exists());
        }

        let user = self.store.insert(&new_user).await.map_err(map_store_error)?;
        info!(user_id = %user.id, name = %user.name, "user created");
        Ok(user)
    }

    /// Apply a partial update to an existing user.
    ///
    /// Existence is checked via `find_by_id` before the mutation so an
    /// absent identifier raises the not-found error rather than silently
    /// succeeding.
    pub async fn update(&self, id: UserId, changes: UserUpdate) -> Result<User, AppError> {
        info!(user_id = %id, "updating user");
        self.find_by_id(id).await?;

        match self
            .store
            .update(id, &changes)
            .await
            .map_err(map_store_error)?
        {
            Some(user) => {
                info!(user_id = %id, name = %user.name, "user updated");
                Ok(user)
            }
            // The record vanished between the existence check and the write.
            None => {
                warn!(user_id = %id, "user disappeared during update");
                Err(AppError::user_not_found())
            }
        }
    }

    /// Remove an existing user.
    pub async fn delete(&self, id: UserId) -> Result<(), AppError> {
        info!(user_id = %id, "deleting user");
        let user = self.find_by_id(id).await?;

        let removed = self.store.delete(id).await.map_err(map_store_error)?;
        if !removed {
            warn!(user_id = %id, "user disappeared during delete");
            return Err(AppError::user_not_found());
        }
        info!(user_id = %id, name = %user.name, "user deleted");
        Ok(())
    }
}

/// Map adapter failures to the generic database error, logging the real
/// cause server-side only.
fn map_store_error(error: UserStoreError) -> AppError {
    error!(error = %error, "user store failure");
    AppError::database_error()
}
