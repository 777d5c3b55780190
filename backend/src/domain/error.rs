//! Domain-level application error.
//!
//! [`AppError`] is transport agnostic: it pairs an [`AppCode`] with the
//! message that will be rendered to clients. Inbound adapters translate it
//! into an HTTP response; nothing in the domain knows about status codes.

use super::AppCode;

/// Application failure raised by validation or domain services.
///
/// The value is immutable after construction: it holds the descriptor code
/// and, optionally, a message rendered at raise time (used by the request
/// validator to embed field-level detail). When no override is present the
/// descriptor's default message is used.
///
/// # Examples
/// ```
/// use backend::domain::{AppCode, AppError};
///
/// let err = AppError::user_not_found();
/// assert_eq!(err.code(), AppCode::UserNotFound);
/// assert_eq!(err.message(), "User not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    code: AppCode,
    message: Option<String>,
}

impl AppError {
    /// Create an error carrying the descriptor's default message.
    pub fn new(code: AppCode) -> Self {
        Self {
            code,
            message: None,
        }
    }

    /// Create an error with a message rendered at raise time.
    pub fn with_message(code: AppCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }

    /// Convenience constructor for [`AppCode::UserNotFound`].
    pub fn user_not_found() -> Self {
        Self::new(AppCode::UserNotFound)
    }

    /// Convenience constructor for [`AppCode::UserAlreadyExists`].
    pub fn user_already_exists() -> Self {
        Self::new(AppCode::UserAlreadyExists)
    }

    /// Convenience constructor for [`AppCode::InvalidInput`] with the
    /// rendered validation detail.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::with_message(AppCode::InvalidInput, message)
    }

    /// Convenience constructor for [`AppCode::InvalidUserId`].
    pub fn invalid_user_id() -> Self {
        Self::new(AppCode::InvalidUserId)
    }

    /// Convenience constructor for [`AppCode::DatabaseError`].
    pub fn database_error() -> Self {
        Self::new(AppCode::DatabaseError)
    }

    /// Convenience constructor for [`AppCode::InternalServerError`].
    pub fn internal_error() -> Self {
        Self::new(AppCode::InternalServerError)
    }

    /// Descriptor this error was raised with.
    pub fn code(&self) -> AppCode {
        self.code
    }

    /// Numeric code carried in the response envelope.
    pub fn numeric_code(&self) -> u16 {
        self.code.code()
    }

    /// Message rendered to clients.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(self.code.message())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}
