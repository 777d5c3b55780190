//! Domain primitives and services.
//!
//! Purpose: define the application code taxonomy, the domain error value,
//! the user entity, and the thin service that executes lookups and mutations
//! against the store port. Everything here is transport agnostic; inbound
//! adapters own the HTTP mapping.
//!
//! Public surface:
//! - [`AppCode`] — closed enumeration of numeric response codes.
//! - [`AppError`] — immutable application failure value.
//! - [`User`], [`NewUser`], [`UserUpdate`], [`UserId`] — entity types.
//! - [`UserService`] — domain operations over the [`ports::UserStore`] port.

pub mod codes;
pub mod error;
pub mod ports;
pub mod user;
pub mod user_service;

pub use self::codes::AppCode;
pub use self::error::AppError;
pub use self::user::{NewUser, User, UserId, UserIdValidationError, UserUpdate};
pub use self::user_service::UserService;
