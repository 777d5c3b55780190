//! HTTP adapter mapping for application errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn failures into the uniform envelope with the status the
//! taxonomy prescribes. This is the only place an HTTP status is decided for
//! a failure path.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::{error, warn};

use crate::domain::{AppCode, AppError};
use crate::middleware::request_log::RequestId;

use super::respond;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, AppError>;

/// HTTP status prescribed by the taxonomy for each code.
///
/// The match is exhaustive so adding a code without deciding its status is a
/// compile error, not a runtime fault.
pub(crate) fn status_for(code: AppCode) -> StatusCode {
    match code {
        AppCode::Success => StatusCode::OK,
        AppCode::UserNotFound => StatusCode::NOT_FOUND,
        AppCode::UserAlreadyExists => StatusCode::CONFLICT,
        AppCode::InvalidInput | AppCode::InvalidUserId => StatusCode::BAD_REQUEST,
        AppCode::DatabaseError | AppCode::InternalServerError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let request_id = RequestId::current().map(|id| id.to_string());
        let request_id = request_id.as_deref().unwrap_or("-");
        if self.status_code().is_server_error() {
            error!(code = self.numeric_code(), error = %self, request_id, "request failed");
        } else {
            warn!(code = self.numeric_code(), error = %self, request_id, "request failed");
        }
        respond::app_error(self)
    }
}

#[cfg(test)]
mod tests;
