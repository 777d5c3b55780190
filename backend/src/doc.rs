//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the health check and the five user CRUD endpoints
//! - **Schemas**: the user entity, the request bodies, and the response
//!   envelope instantiations
//!
//! The generated specification feeds Swagger UI (debug builds) and any
//! external documentation tooling.

use serde_json::Value;
use utoipa::OpenApi;

use crate::domain::User;
use crate::inbound::http::respond::Envelope;
use crate::inbound::http::users::{CreateUserBody, UpdateUserBody};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster backend API",
        description = "User CRUD endpoints returning the uniform {code, message, data} envelope."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::health_check,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
    ),
    components(schemas(
        User,
        CreateUserBody,
        UpdateUserBody,
        Envelope<User>,
        Envelope<Vec<User>>,
        Envelope<Value>,
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI path and schema registration.

    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_registers_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/health-check",
            "/users",
            "/users/{id}",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn openapi_user_schema_has_wire_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user_schema = schemas.get("User").expect("User schema");

        for field in ["id", "name", "email", "age", "createdAt", "updatedAt"] {
            assert_object_schema_has_field(user_schema, field);
        }
    }
}
