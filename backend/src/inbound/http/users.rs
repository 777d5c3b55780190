//! Users API handlers.
//!
//! ```text
//! GET    /users
//! GET    /users/{id}
//! POST   /users
//! PUT    /users/{id}
//! DELETE /users/{id}
//! ```
//!
//! Each handler validates its input explicitly, delegates to the domain
//! service, and renders the uniform envelope through `respond`.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{AppError, NewUser, User, UserUpdate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::respond::{self, Envelope};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    Violations, optional_age, optional_email, optional_name, parse_user_id, require_age,
    require_email, require_name,
};

/// Request body for `POST /users`.
///
/// Fields are optional at the serde layer so that every missing field is
/// reported by the validator alongside the other violations, instead of the
/// first one aborting deserialisation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserBody {
    /// Display name, required and non-empty.
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    /// Contact email, required and format-checked.
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    /// Age in years, required, 1–150.
    #[schema(example = 36)]
    pub age: Option<i32>,
}

/// Request body for `PUT /users/{id}`; every field optional.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserBody {
    /// Replacement display name, non-empty when provided.
    #[schema(example = "Ada King")]
    pub name: Option<String>,
    /// Replacement email, format-checked when provided.
    #[schema(example = "ada@lovelace.dev")]
    pub email: Option<String>,
    /// Replacement age, 1–150 when provided.
    #[schema(example = 37)]
    pub age: Option<i32>,
}

fn parse_create_user(body: CreateUserBody) -> Result<NewUser, AppError> {
    let mut violations = Violations::new();
    let name = require_name(body.name, &mut violations);
    let email = require_email(body.email, &mut violations);
    let age = require_age(body.age, &mut violations);

    match (name, email, age) {
        (Some(name), Some(email), Some(age)) => Ok(NewUser { name, email, age }),
        _ => Err(violations.into_error()),
    }
}

fn parse_update_user(body: UpdateUserBody) -> Result<UserUpdate, AppError> {
    let mut violations = Violations::new();
    let name = optional_name(body.name, &mut violations);
    let email = optional_email(body.email, &mut violations);
    let age = optional_age(body.age, &mut violations);
    violations.into_result()?;
    Ok(UserUpdate { name, email, age })
}

/// List every user.
///
/// An empty store yields an empty list, not an error.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users retrieved", body = Envelope<Vec<User>>),
        (status = 500, description = "Store failure", body = Envelope<Value>)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users.find_all().await?;
    Ok(respond::ok_with_message(
        "Users retrieved successfully",
        Some(users),
    ))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User retrieved", body = Envelope<User>),
        (status = 400, description = "Malformed identifier", body = Envelope<Value>),
        (status = 404, description = "User not found", body = Envelope<Value>),
        (status = 500, description = "Store failure", body = Envelope<Value>)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path.into_inner())?;
    let user = state.users.find_by_id(id).await?;
    Ok(respond::ok_with_message(
        "User retrieved successfully",
        Some(user),
    ))
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User created", body = Envelope<User>),
        (status = 400, description = "Validation failure", body = Envelope<Value>),
        (status = 409, description = "Email already registered", body = Envelope<Value>),
        (status = 500, description = "Store failure", body = Envelope<Value>)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let new_user = parse_create_user(payload.into_inner())?;
    let user = state.users.create(new_user).await?;
    info!(user_id = %user.id, "user created via API");
    Ok(respond::created("User created successfully", Some(user)))
}

/// Update an existing user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "User updated", body = Envelope<User>),
        (status = 400, description = "Validation failure", body = Envelope<Value>),
        (status = 404, description = "User not found", body = Envelope<Value>),
        (status = 500, description = "Store failure", body = Envelope<Value>)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path.into_inner())?;
    let changes = parse_update_user(payload.into_inner())?;
    let user = state.users.update(id, changes).await?;
    Ok(respond::ok_with_message(
        "User updated successfully",
        Some(user),
    ))
}

/// Delete an existing user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = Envelope<Value>),
        (status = 400, description = "Malformed identifier", body = Envelope<Value>),
        (status = 404, description = "User not found", body = Envelope<Value>),
        (status = 500, description = "Store failure", body = Envelope<Value>)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path.into_inner())?;
    state.users.delete(id).await?;
    Ok(respond::ok_with_message(
        "User deleted successfully",
        None::<Value>,
    ))
}
