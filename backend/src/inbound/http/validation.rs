//! Request validation helpers for inbound HTTP adapters.
//!
//! Validation is an explicit pipeline stage: each route's parse function
//! (see `users.rs`) checks the declared constraints, collects every
//! violation into a [`Violations`] accumulator, and returns
//! `Result<ValidatedInput, AppError>`. On failure the violations are joined
//! into a single rendered message on the invalid-input code, so one response
//! reports everything that is wrong with the payload.

use tracing::warn;

use crate::domain::{AppError, UserId};

/// Inclusive lower bound for the `age` field.
pub(crate) const AGE_MIN: i32 = 1;
/// Inclusive upper bound for the `age` field.
pub(crate) const AGE_MAX: i32 = 150;

/// Accumulator collecting every violated constraint for one request.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Render the collected violations as one invalid-input error.
    pub(crate) fn into_error(self) -> AppError {
        let detail = self.messages.join(", ");
        warn!(detail = %detail, "request validation failed");
        AppError::invalid_input(format!("Invalid input: {detail}"))
    }

    /// Forward control when no constraint was violated.
    pub(crate) fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

/// Parse a path identifier declared as an integer.
///
/// A non-numeric or non-positive identifier is a validation failure with its
/// own code, never a server fault.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, AppError> {
    raw.parse::<i64>()
        .ok()
        .and_then(|value| UserId::new(value).ok())
        .ok_or_else(|| {
            warn!(id = raw, "rejected malformed user id");
            AppError::invalid_user_id()
        })
}

/// Structural email check: one `@` with a non-empty local part and a dotted,
/// non-empty domain.
pub(crate) fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Required `name`: present and non-empty after trimming.
pub(crate) fn require_name(value: Option<String>, violations: &mut Violations) -> Option<String> {
    match value {
        Some(name) if !name.trim().is_empty() => Some(name),
        Some(_) => {
            violations.push("name must not be empty");
            None
        }
        None => {
            violations.push("name is required");
            None
        }
    }
}

/// Required `email`: present and format-checked.
pub(crate) fn require_email(value: Option<String>, violations: &mut Violations) -> Option<String> {
    match value {
        Some(email) if is_valid_email(&email) => Some(email),
        Some(_) => {
            violations.push("email must be a valid email address");
            None
        }
        None => {
            violations.push("email is required");
            None
        }
    }
}

/// Required `age`: present and within bounds.
pub(crate) fn require_age(value: Option<i32>, violations: &mut Violations) -> Option<i32> {
    match value {
        Some(age) if (AGE_MIN..=AGE_MAX).contains(&age) => Some(age),
        Some(_) => {
            violations.push(format!("age must be between {AGE_MIN} and {AGE_MAX}"));
            None
        }
        None => {
            violations.push("age is required");
            None
        }
    }
}

/// Optional `name`: constrained only when provided.
pub(crate) fn optional_name(value: Option<String>, violations: &mut Violations) -> Option<String> {
    value.and_then(|name| {
        if name.trim().is_empty() {
            violations.push("name must not be empty");
            None
        } else {
            Some(name)
        }
    })
}

/// Optional `email`: constrained only when provided.
pub(crate) fn optional_email(value: Option<String>, violations: &mut Violations) -> Option<String> {
    value.and_then(|email| {
        if is_valid_email(&email) {
            Some(email)
        } else {
            violations.push("email must be a valid email address");
            None
        }
    })
}

/// Optional `age`: constrained only when provided.
pub(crate) fn optional_age(value: Option<i32>, violations: &mut Violations) -> Option<i32> {
    value.and_then(|age| {
        if (AGE_MIN..=AGE_MAX).contains(&age) {
            Some(age)
        } else {
            violations.push(format!("age must be between {AGE_MIN} and {AGE_MAX}"));
            None
        }
    })
}
