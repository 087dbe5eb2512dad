//! HTTP surface for the scoring service.
//!
//! Thin plumbing around [`CarbonScoreService`]: request decoding, boundary
//! validation, and response shaping. Handlers hold the service behind an
//! `Arc` extension; scoring itself keeps no cross-call state.

use axum::{
    extract::Extension,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use crate::company_metrics::CompanyMetrics;
use crate::errors::CarbonError;
use crate::input_validator::validate_metrics;
use crate::score_result::ScoredPrediction;
use crate::score_service::CarbonScoreService;

pub const SERVICE_NAME: &str = "CarbonScoreX ML Service";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub model_type: String,
}

/// One slot of a batch response. Failed records keep their position.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Scored(ScoredPrediction),
    Failed { error: String },
}

#[derive(Debug, Serialize)]
pub struct BatchPredictResponse {
    pub predictions: Vec<BatchEntry>,
    pub count: usize,
}

/// Build the scoring router: prediction endpoints, versioned aliases, and
/// health checks, with permissive CORS for browser dashboards.
pub fn build_score_router(service: Arc<CarbonScoreService>) -> Router {
    Router::new()
        .route("/", get(root))
        // current endpoints
        .route("/predict", post(predict))
        .route("/batch-predict", post(batch_predict))
        .route("/health", get(health))
        .route("/model-info", get(model_info))
        // versioned aliases
        .route("/v1/predict", post(predict))
        .route("/v1/batch-predict", post(batch_predict))
        // liveness / readiness
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .layer(CorsLayer::permissive())
        .layer(Extension(service))
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "status": "operational",
    }))
}

#[axum::debug_handler]
async fn predict(
    Extension(service): Extension<Arc<CarbonScoreService>>,
    Json(metrics): Json<CompanyMetrics>,
) -> Result<Json<ScoredPrediction>, CarbonError> {
    let request_id = Uuid::new_v4();
    validate_metrics(&metrics)?;

    let prediction = service.predict(&metrics)?;
    info!(
        %request_id,
        score = prediction.result.score,
        model_version = %prediction.model_version,
        "scored prediction request"
    );

    Ok(Json(prediction))
}

#[axum::debug_handler]
async fn batch_predict(
    Extension(service): Extension<Arc<CarbonScoreService>>,
    Json(batch): Json<Vec<CompanyMetrics>>,
) -> Json<BatchPredictResponse> {
    let request_id = Uuid::new_v4();

    let predictions: Vec<BatchEntry> = batch
        .iter()
        .map(|metrics| {
            validate_metrics(metrics)
                .and_then(|()| service.predict(metrics))
                .map_or_else(
                    |e| BatchEntry::Failed {
                        error: e.to_string(),
                    },
                    BatchEntry::Scored,
                )
        })
        .collect();

    let count = predictions.len();
    info!(%request_id, count, "scored batch prediction request");

    Json(BatchPredictResponse { predictions, count })
}

#[axum::debug_handler]
async fn health(
    Extension(service): Extension<Arc<CarbonScoreService>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: service.model_loaded(),
        model_type: service
            .model_kind()
            .unwrap_or("fallback")
            .to_string(),
    })
}

#[axum::debug_handler]
async fn model_info(
    Extension(service): Extension<Arc<CarbonScoreService>>,
) -> Json<serde_json::Value> {
    Json(service.model_info())
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[axum::debug_handler]
async fn readyz(
    Extension(service): Extension<Arc<CarbonScoreService>>,
) -> Json<serde_json::Value> {
    // Fallback mode still serves; readiness reports which path is active.
    let mode = if service.model_loaded() {
        "model"
    } else {
        "fallback"
    };
    Json(serde_json::json!({ "ready": true, "mode": mode }))
}
