//! Health endpoint for orchestration and load balancers.

use actix_web::{HttpResponse, get};
use serde_json::Value;
use tracing::info;

use crate::inbound::http::respond::{self, Envelope};

/// Liveness probe. Responds with a success envelope while the process is
/// serving traffic.
#[utoipa::path(
    get,
    path = "/health-check",
    responses(
        (status = 200, description = "Service is healthy", body = Envelope<Value>)
    ),
    tags = ["health"],
    operation_id = "healthCheck"
)]
#[get("/health-check")]
pub async fn health_check() -> HttpResponse {
    info!("health check endpoint accessed");
    respond::ok_with_message("Service is healthy", None::<Value>)
}
