//! Response envelope builders.
//!
//! Every JSON body leaving this service is the uniform envelope
//! `{code, message, data}`: `code = 0` with the payload for success, the
//! descriptor's numeric code with `data = null` for failures. Handlers call
//! the builders here and never hand-construct the shape.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{AppCode, AppError};

use super::error::status_for;

/// Uniform response envelope.
///
/// `data` is always serialised, as `null` when absent, so clients can rely
/// on exactly three keys in every body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    /// Numeric application code; `0` means success.
    #[schema(example = 0)]
    pub code: u16,
    /// Human-readable outcome description.
    #[schema(example = "Success")]
    pub message: String,
    /// Operation payload, `null` for failures and data-less successes.
    pub data: Option<T>,
}

fn render<T: Serialize>(
    status: StatusCode,
    code: AppCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status).json(Envelope {
        code: code.code(),
        message: message.into(),
        data,
    })
}

/// Success envelope with the generic success message.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    render(
        StatusCode::OK,
        AppCode::Success,
        AppCode::Success.message(),
        Some(data),
    )
}

/// Success envelope describing the specific operation that completed.
pub fn ok_with_message<T: Serialize>(message: impl Into<String>, data: Option<T>) -> HttpResponse {
    render(StatusCode::OK, AppCode::Success, message, data)
}

/// Creation envelope (HTTP 201) describing the created resource.
pub fn created<T: Serialize>(message: impl Into<String>, data: Option<T>) -> HttpResponse {
    render(StatusCode::CREATED, AppCode::Success, message, data)
}

/// Error envelope for a bare descriptor, `data = null`.
pub fn error(code: AppCode) -> HttpResponse {
    app_error(&AppError::new(code))
}

/// Error envelope for an application error, `data = null`.
pub fn app_error(error: &AppError) -> HttpResponse {
    render(
        status_for(error.code()),
        error.code(),
        error.message(),
        None::<Value>,
    )
}
