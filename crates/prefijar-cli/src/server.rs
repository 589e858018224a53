//! HTTP front end for the worker protocol.
//!
//! Exposes the same JSON envelopes the worker speaks: `POST /transform`
//! takes a request envelope and returns the reply envelope with HTTP 200,
//! because transform and protocol failures are data-carried. Only a dead
//! worker channel maps to an HTTP error status.

use crate::error::CliResult;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use prefijar::{TransformWorker, WorkerHandle, WorkerRequest};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

/// Configuration for the transform server
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Host to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allow cross-origin requests
    pub cors: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors: false,
        }
    }
}

/// The transform server: one worker actor shared across all connections.
#[derive(Debug)]
pub struct TransformServer {
    config: ServeConfig,
}

impl TransformServer {
    /// Create a new transform server
    #[must_use]
    pub fn new(config: ServeConfig) -> Self {
        Self { config }
    }

    /// Spawn the worker and serve until interrupted.
    pub async fn run(&self) -> CliResult<()> {
        let worker = TransformWorker::spawn();
        let app = build_router(worker, self.config.cors);

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| crate::error::CliError::server(format!("invalid bind address: {e}")))?;

        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║                 Prefijar Transform Server                     ║");
        println!("╠══════════════════════════════════════════════════════════════╣");
        println!("║  HTTP:      http://{:<42}║", addr);
        println!("║  Endpoints: POST /transform  GET /status  GET /healthz       ║");
        println!(
            "║  CORS:      {:<48}║",
            if self.config.cors { "enabled" } else { "disabled" }
        );
        println!("╠══════════════════════════════════════════════════════════════╣");
        println!("║  Press Ctrl+C to stop                                        ║");
        println!("╚══════════════════════════════════════════════════════════════╝");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Build the protocol router around a worker handle.
#[must_use]
pub fn build_router(worker: WorkerHandle, cors: bool) -> Router {
    let router = Router::new()
        .route("/transform", post(handle_envelope))
        .route("/status", get(handle_status))
        .route("/healthz", get(|| async { "ok" }))
        // replies are per-request, never cacheable
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(worker);

    if cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}

/// `POST /transform`: raw protocol envelope in, reply envelope out.
async fn handle_envelope(State(worker): State<WorkerHandle>, body: String) -> Response {
    match worker.request_raw(&body).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => channel_failure(&e),
    }
}

/// `GET /status`: worker state snapshot.
async fn handle_status(State(worker): State<WorkerHandle>) -> Response {
    match worker.request(WorkerRequest::GetStatus).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => channel_failure(&e),
    }
}

fn channel_failure(error: &prefijar::PrefijarError) -> Response {
    tracing::error!(%error, "worker channel failure");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(serde_json::json!({ "type": "error", "error": error.to_string() })),
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn post_envelope(envelope: &str) -> Value {
        let app = build_router(TransformWorker::spawn(), false);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/transform")
                    .header("content-type", "application/json")
                    .body(Body::from(envelope.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_transform_endpoint() {
        let reply = post_envelope(r#"{"type":"transform","cssText":".a { display: flex; }"}"#).await;
        assert_eq!(reply["type"], "transform_success");
        assert!(reply["data"]["css"].as_str().unwrap().contains("-webkit-"));
    }

    #[tokio::test]
    async fn test_unknown_type_is_http_200_error_envelope() {
        let reply = post_envelope(r#"{"type":"nonsense"}"#).await;
        assert_eq!(reply["type"], "error");
        assert!(reply["error"]
            .as_str()
            .unwrap()
            .contains("unknown message type: nonsense"));
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = build_router(TransformWorker::spawn(), false);
        let response = app
            .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let reply: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(reply["type"], "status");
        assert!(reply["data"]["pipelineAvailable"].as_bool().unwrap());
    }

    #[tokio::test]
    async fn test_healthz() {
        let app = build_router(TransformWorker::spawn(), false);
        let response = app
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_default_config() {
        let config = ServeConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
        assert!(!config.cors);
    }
}
