//! End-to-end test for the health check endpoint.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::InMemoryUserStore;
use backend::server::build_app;

#[actix_web::test]
async fn health_check_reports_the_service_as_healthy() {
    let app = test::init_service(build_app(HttpState::new(Arc::new(InMemoryUserStore::new()))))
        .await;

    let request = test::TestRequest::get().uri("/health-check").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["message"], "Service is healthy");
    assert_eq!(body["data"], Value::Null);
}
