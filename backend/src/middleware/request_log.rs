//! Request logging middleware with a request-scoped correlation identifier.
//!
//! Each incoming request receives a UUID `request_id` (reusing a valid
//! inbound `x-request-id` header when present) stored in task-local storage
//! for correlation across log lines, and echoed back on the response.
//!
//! The middleware is also the terminal failure stage: any error propagating
//! out of the handler chain is logged with the request method, path, and
//! client address, then rendered as the uniform envelope — recognised
//! application errors with their own code and status, anything else as the
//! internal-server-error descriptor with no detail leaked to the client.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`RequestId::scope`] when spawning new tasks to propagate the active
//! identifier.

use std::future::Future;
use std::task::{Context, Poll};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::AppError;

/// Header carrying the request correlation identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

task_local! {
    static REQUEST_ID: RequestId;
}

/// Per-request correlation identifier exposed via task-local storage.
///
/// # Examples
/// ```
/// use backend::middleware::request_log::RequestId;
///
/// async fn handler() {
///     if let Some(id) = RequestId::current() {
///         println!("request id: {}", id);
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(Uuid);

impl RequestId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the current request identifier if one is in scope.
    pub fn current() -> Option<Self> {
        REQUEST_ID.try_with(|id| *id).ok()
    }

    /// Execute the provided future with the supplied identifier in scope.
    pub async fn scope<Fut>(request_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_ID.scope(request_id, fut).await
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Middleware attaching the correlation identifier, writing the completion
/// log line, and rendering failures as the uniform envelope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::RequestLog;
///
/// let app = App::new().wrap(RequestLog);
/// ```
#[derive(Clone)]
pub struct RequestLog;

impl<S, B> Transform<S, ServiceRequest> for RequestLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLogMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequestLog`].
///
/// Applications should not use this type directly.
pub struct RequestLogMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<RequestId>().ok())
            .unwrap_or_else(RequestId::generate);
        let method = req.method().clone();
        let path = req.path().to_owned();
        let client = req
            .connection_info()
            .realip_remote_addr()
            .map(str::to_owned);

        // Keep a handle on the request so failures can still be rendered as
        // a response carrying the correlation header.
        let (http_req, payload) = req.into_parts();
        let fut = self
            .service
            .call(ServiceRequest::from_parts(http_req.clone(), payload));

        Box::pin(RequestId::scope(request_id, async move {
            let client = client.as_deref().unwrap_or("-").to_owned();
            let mut res = match fut.await {
                Ok(res) => res.map_into_boxed_body(),
                Err(err) => {
                    // A recognised application error logs itself when it is
                    // rendered; only the cause of anything else is recorded
                    // here because it never reaches the client.
                    let response = match err.as_error::<AppError>() {
                        Some(app_error) => app_error.error_response(),
                        None => {
                            error!(
                                error = %err,
                                method = %method,
                                path = %path,
                                client = %client,
                                request_id = %request_id,
                                "unrecognised error reached the terminal handler"
                            );
                            AppError::internal_error().error_response()
                        }
                    };
                    ServiceResponse::new(http_req, response)
                }
            };

            match HeaderValue::from_str(&request_id.to_string()) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                }
                Err(header_error) => {
                    error!(
                        error = %header_error,
                        request_id = %request_id,
                        "failed to encode request identifier header"
                    );
                }
            }

            let status = res.status();
            if status.is_server_error() {
                error!(method = %method, path = %path, status = status.as_u16(), client = %client, request_id = %request_id, "request completed");
            } else if status.is_client_error() {
                warn!(method = %method, path = %path, status = status.as_u16(), client = %client, request_id = %request_id, "request completed");
            } else {
                info!(method = %method, path = %path, status = status.as_u16(), client = %client, request_id = %request_id, "request completed");
            }

            Ok(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use serde_json::Value;

    #[tokio::test]
    async fn request_id_generate_produces_uuid() {
        let request_id = RequestId::generate();
        let parsed = Uuid::parse_str(&request_id.to_string()).expect("valid UUID");
        assert_eq!(parsed.to_string(), request_id.to_string());
    }

    #[tokio::test]
    async fn request_id_current_reflects_scope() {
        let expected = RequestId::generate();
        let observed = RequestId::scope(expected, async move { RequestId::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn request_id_current_is_none_out_of_scope() {
        assert!(RequestId::current().is_none());
    }

    #[tokio::test]
    async fn request_id_from_str_round_trips() {
        let uuid = Uuid::nil();
        let request_id: RequestId = uuid.to_string().parse().expect("parse uuid");
        assert_eq!(request_id.to_string(), uuid.to_string());
    }

    #[actix_web::test]
    async fn adds_request_id_header() {
        let app = test::init_service(
            App::new()
                .wrap(RequestLog)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let req = test::TestRequest::get().uri("/").to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[actix_web::test]
    async fn reuses_a_valid_incoming_request_id() {
        let app = test::init_service(
            App::new()
                .wrap(RequestLog)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let inbound = Uuid::nil().to_string();
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((REQUEST_ID_HEADER, inbound.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        let echoed = res
            .headers()
            .get(REQUEST_ID_HEADER)
            .expect("request id header")
            .to_str()
            .expect("header is ascii");
        assert_eq!(echoed, inbound);
    }

    #[actix_web::test]
    async fn exposes_request_id_in_handler() {
        let app = test::init_service(App::new().wrap(RequestLog).route(
            "/",
            web::get().to(|| async move {
                let id = RequestId::current().expect("request id in scope");
                HttpResponse::Ok().body(id.to_string())
            }),
        ))
        .await;
        let req = test::TestRequest::get().uri("/").to_request();
        let res = test::call_service(&app, req).await;
        let echoed = res
            .headers()
            .get(REQUEST_ID_HEADER)
            .expect("request id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        let body = test::read_body(res).await;
        let body = std::str::from_utf8(&body).expect("utf8 body");
        assert_eq!(echoed, body);
    }

    #[actix_web::test]
    async fn application_errors_render_the_envelope() {
        let app = test::init_service(App::new().wrap(RequestLog).route(
            "/",
            web::get().to(|| async {
                Result::<HttpResponse, AppError>::Err(AppError::user_not_found())
            }),
        ))
        .await;
        let req = test::TestRequest::get().uri("/").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(res.headers().contains_key(REQUEST_ID_HEADER));

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 1000);
        assert_eq!(body["data"], Value::Null);
    }

    #[actix_web::test]
    async fn unrecognised_errors_render_the_internal_envelope() {
        // Without a JsonConfig mapping payload failures to an application
        // error, the extractor's own error reaches the terminal stage.
        let app = test::init_service(App::new().wrap(RequestLog).route(
            "/",
            web::post().to(|_body: web::Json<Value>| async { HttpResponse::Ok().finish() }),
        ))
        .await;
        let req = test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(res.headers().contains_key(REQUEST_ID_HEADER));

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 1201);
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["data"], Value::Null);
    }
}
