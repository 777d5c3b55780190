//! User entity and mutation payloads.
//!
//! Purpose: define the strongly typed user record exchanged between the
//! store, the domain service, and the HTTP adapter. Serialisation follows the
//! wire contract (camelCase field names); invariants are enforced by the
//! [`UserId`] newtype constructor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Validated user identifier.
///
/// Identifiers are positive integers assigned by the data store; zero and
/// negative values never exist and are rejected at construction.
///
/// # Examples
/// ```
/// use backend::domain::UserId;
///
/// let id = UserId::new(7).expect("positive id");
/// assert_eq!(id.get(), 7);
/// assert!(UserId::new(0).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i64, example = 1)]
pub struct UserId(i64);

/// Validation errors returned when constructing [`UserId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserIdValidationError {
    /// Identifier is zero or negative.
    #[error("user id must be a positive integer")]
    NotPositive,
}

impl UserId {
    /// Construct an identifier after validating that it is positive.
    pub fn new(value: i64) -> Result<Self, UserIdValidationError> {
        if value <= 0 {
            return Err(UserIdValidationError::NotPositive);
        }
        Ok(Self(value))
    }

    /// Return the underlying integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Application user record.
///
/// Owned by the data store; the domain service only passes it through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Display name.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Contact email, unique across the store.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Age in years.
    #[schema(example = 36)]
    pub age: i32,
    /// Creation timestamp, assigned by the store.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp, bumped by the store on every update.
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for creating a user.
///
/// Produced by the request validator; identifiers and timestamps are
/// assigned by the store at insertion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name, non-empty.
    pub name: String,
    /// Contact email, already format-checked.
    pub email: String,
    /// Age in years, within the accepted bounds.
    pub age: i32,
}

/// Validated partial update for an existing user.
///
/// Absent fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    /// Replacement display name, when provided.
    pub name: Option<String>,
    /// Replacement email, when provided.
    pub email: Option<String>,
    /// Replacement age, when provided.
    pub age: Option<i32>,
}

impl UserUpdate {
    /// Return true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}
