//! Routes:
//!
//! - `POST /genesis`: body is a genesis specification, response is the
//!   genesis header JSON. Each request commits into its own ephemeral store.
//! - `GET /`: liveness check, body `pong`.

use crate::domain::error::{ApiError, ApiResult};
use crate::middleware::{GatewayMetrics, TracingLayer};
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use gf_04_genesis_service::{GenesisService, StoreMode};
use shared_types::BlockHeader;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::warn;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: GenesisService,
    pub metrics: Arc<GatewayMetrics>,
}

/// Later layers wrap earlier ones, so tracing sees every response,
/// including body-limit rejections.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let tracing = TracingLayer::new(Arc::clone(&state.metrics));

    Router::new()
        .route("/", get(ping))
        .route("/genesis", post(construct_genesis))
        // The tower-http limit replaces axum's built-in 2 MiB default.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(tracing)
        .with_state(state)
}

async fn ping() -> &'static str {
    "pong"
}

async fn construct_genesis(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<BlockHeader>> {
    let service = state.service.clone();
    // Commitment is CPU-bound; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || {
        service.construct(&body, &StoreMode::Ephemeral)
    })
    .await
    .map_err(|e| {
        warn!("[gf-05] construction task failed: {}", e);
        ApiError::internal(format!("construction task failed: {e}"))
    })?;

    match result {
        Ok(header) => Ok(Json(header)),
        Err(e) => {
            if !e.is_client_error() {
                warn!("[gf-05] genesis construction failed: {}", e);
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    const SPEC: &str = r#"{
        "config": {"chainId": 1337, "londonBlock": 0},
        "alloc": {"7e5f4552091a69125d5dfcb7b8c2659029395bdf": {"balance": "1000"}},
        "difficulty": "1",
        "gasLimit": "30000000"
    }"#;

    fn router() -> (Router, AppState) {
        let state = AppState {
            service: GenesisService::new(),
            metrics: Arc::new(GatewayMetrics::new()),
        };
        (build_router(state.clone(), 64 * 1024), state)
    }

    fn post_genesis(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/genesis")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let (app, _) = router();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"pong");
    }

    #[tokio::test]
    async fn test_genesis_returns_header() {
        let (app, _) = router();
        let response = app.oneshot(post_genesis(SPEC)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let header = json_body(response).await;
        assert_eq!(
            header["hash"],
            "0xa982c80d258ba97501a243fd76dcaeaef22189212956696b7dab76fd4b03fe0a"
        );
        assert_eq!(header["baseFeePerGas"], "0x3b9aca00");
        assert!(header["withdrawalsRoot"].is_null());
    }

    #[tokio::test]
    async fn test_missing_alloc_is_bad_request() {
        let (app, state) = router();
        let response = app
            .oneshot(post_genesis(
                r#"{"config": {}, "difficulty": "1", "gasLimit": "1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["kind"], "InvalidSpec");
        assert!(body["message"].as_str().unwrap().contains("alloc"));
        assert_eq!(state.service.metrics().snapshot().invalid_specs, 1);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (app, _) = router();
        let response = app.oneshot(post_genesis("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["kind"], "InvalidSpec");
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let (app, state) = router();
        let response = app
            .oneshot(post_genesis(vec![b' '; 128 * 1024]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(state.metrics.snapshot().client_errors, 1);
    }

    #[tokio::test]
    async fn test_get_genesis_is_not_allowed() {
        let (app, _) = router();
        let response = app
            .oneshot(Request::builder().uri("/genesis").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
