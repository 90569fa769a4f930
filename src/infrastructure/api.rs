//! API Server
//!
//! Exposes the prediction endpoint and the health probe.
//! Accesses the PredictionDispatcher via shared state.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::dispatcher::PredictionDispatcher;
use crate::infrastructure::config::ApiConfig;
use crate::infrastructure::metrics::MetricsCollector;
use crate::{ForecastError, Result};

/// Successful prediction response
#[derive(Debug, Serialize)]
pub struct PredictionsDto {
    pub predictions: HashMap<String, f64>,
}

/// Uniform error response
#[derive(Debug, Serialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<PredictionDispatcher>,
    pub metrics: Arc<MetricsCollector>,
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        // API Endpoints
        .route("/predict_auto", post(predict_auto))
        .route("/health", get(health))
        // Middleware
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the API server
pub async fn start_server(
    dispatcher: Arc<PredictionDispatcher>,
    metrics: Arc<MetricsCollector>,
    config: &ApiConfig,
) -> Result<()> {
    let app = router(AppState {
        dispatcher,
        metrics,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(ForecastError::Io)?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ForecastError::Io)?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received. Exiting...");
}

/// Handler for POST /predict_auto
///
/// Body: JSON object of asset id -> current price. Any failure, malformed
/// body included, maps to HTTP 500 with an error field.
async fn predict_auto(State(state): State<AppState>, body: Bytes) -> Response {
    state.metrics.record_request();

    let result = serde_json::from_slice::<HashMap<String, f64>>(&body)
        .map_err(|e| ForecastError::Parse(e.to_string()))
        .and_then(|request| state.dispatcher.predict_batch(&request));

    match result {
        Ok(predictions) => (StatusCode::OK, Json(PredictionsDto { predictions })).into_response(),
        Err(e) => {
            state.metrics.record_failure();
            tracing::error!("Prediction request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDto {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Handler for GET /health
async fn health() -> Json<HealthDto> {
    Json(HealthDto { status: "healthy" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ModelCollection;
    use crate::test_utils::{FailingModel, FixedModel};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router(models: ModelCollection) -> Router {
        let metrics = Arc::new(MetricsCollector::new());
        let dispatcher = Arc::new(PredictionDispatcher::new(Arc::new(models), metrics.clone()));
        router(AppState {
            dispatcher,
            metrics,
        })
    }

    async fn send_predict(router: Router, body: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/predict_auto")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_always_healthy() {
        let response = test_router(ModelCollection::empty())
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn test_predict_fallback_within_band() {
        let (status, body) =
            send_predict(test_router(ModelCollection::empty()), r#"{"bitcoin": 50000.0}"#).await;

        assert_eq!(status, StatusCode::OK);
        let predicted = body["predictions"]["bitcoin"].as_f64().unwrap();
        assert!(predicted >= 49000.0);
        assert!(predicted <= 51000.0);
    }

    #[tokio::test]
    async fn test_predict_uses_registered_model() {
        let mut models = ModelCollection::empty();
        models.insert("ethereum", Box::new(FixedModel(3100.0)));

        let (status, body) =
            send_predict(test_router(models), r#"{"ethereum": 3000.0}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"predictions": {"ethereum": 3100.0}}));
    }

    #[tokio::test]
    async fn test_empty_request_yields_empty_predictions() {
        let (status, body) = send_predict(test_router(ModelCollection::empty()), "{}").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"predictions": {}}));
    }

    #[tokio::test]
    async fn test_malformed_body_is_500_with_error() {
        let (status, body) =
            send_predict(test_router(ModelCollection::empty()), "not json").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_non_object_body_is_500_with_error() {
        let (status, body) =
            send_predict(test_router(ModelCollection::empty()), r#"[1, 2, 3]"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_model_failure_is_500_without_partial_results() {
        let mut models = ModelCollection::empty();
        models.insert("tether", Box::new(FailingModel));

        let (status, body) = send_predict(
            test_router(models),
            r#"{"tether": 1.0, "bitcoin": 50000.0}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
        assert!(body.get("predictions").is_none());
    }
}
