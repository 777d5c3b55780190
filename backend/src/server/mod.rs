//! Server construction and middleware wiring.

mod config;

pub use config::ServerSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::RequestLog;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::AppError;
use crate::inbound::http::health::health_check;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{create_user, delete_user, get_user, list_users, update_user};
use crate::outbound::persistence::InMemoryUserStore;

/// JSON extractor configuration rendering payload failures as the
/// invalid-input envelope instead of the framework's plain-text response.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        warn!(method = %req.method(), path = req.path(), error = %err, "request payload rejected");
        AppError::invalid_input(format!("Invalid input: {err}")).into()
    })
}

/// Build the application with all routes, state, and middleware.
///
/// Exposed so integration tests drive the exact app the server runs.
pub fn build_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(RequestLog)
        .service(health_check)
        .service(list_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server bound per the provided settings.
///
/// The user store is the in-memory adapter; swapping in a database-backed
/// adapter only changes the value handed to [`HttpState::new`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(settings: &ServerSettings) -> std::io::Result<Server> {
    let state = HttpState::new(Arc::new(InMemoryUserStore::new()));
    let server = HttpServer::new(move || build_app(state.clone()))
        .bind((settings.host(), settings.port()))?
        .run();
    Ok(server)
}
