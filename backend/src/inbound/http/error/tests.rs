//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::Value;

use super::*;

#[rstest]
#[case(AppCode::Success, StatusCode::OK)]
#[case(AppCode::UserNotFound, StatusCode::NOT_FOUND)]
#[case(AppCode::UserAlreadyExists, StatusCode::CONFLICT)]
#[case(AppCode::InvalidInput, StatusCode::BAD_REQUEST)]
#[case(AppCode::InvalidUserId, StatusCode::BAD_REQUEST)]
#[case(AppCode::DatabaseError, StatusCode::INTERNAL_SERVER_ERROR)]
#[case(AppCode::InternalServerError, StatusCode::INTERNAL_SERVER_ERROR)]
fn status_follows_the_taxonomy(#[case] code: AppCode, #[case] expected: StatusCode) {
    assert_eq!(status_for(code), expected);
}

#[rstest]
#[case(AppError::user_not_found(), StatusCode::NOT_FOUND)]
#[case(AppError::invalid_user_id(), StatusCode::BAD_REQUEST)]
#[case(AppError::database_error(), StatusCode::INTERNAL_SERVER_ERROR)]
fn response_error_exposes_the_taxonomy_status(
    #[case] error: AppError,
    #[case] expected: StatusCode,
) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[actix_web::test]
async fn error_response_is_the_envelope_with_null_data() {
    let error = AppError::user_not_found();
    let response = error.error_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = to_bytes(response.into_body()).await.expect("body bytes");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["code"], 1000);
    assert_eq!(body["message"], "User not found");
    assert_eq!(body["data"], Value::Null);
}
