//! Backend entry-point: wires REST endpoints and OpenAPI docs.

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::server::{ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;

    let host = settings.host().to_owned();
    let port = settings.port();
    info!(host = %host, port, "starting server");

    let server = create_server(&settings)?;
    info!("server running on http://{host}:{port}");
    info!("health check: http://{host}:{port}/health-check");
    #[cfg(debug_assertions)]
    info!("API documentation: http://{host}:{port}/docs");

    server.await
}
