// tests/web_api.rs
// End-to-end checks of the HTTP surface in both serving modes.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use carbonscorex::carbonweb::build_score_router;
use carbonscorex::fallback_scorer::FALLBACK_MODEL_VERSION;
use carbonscorex::feature_align::FeatureSchema;
use carbonscorex::model_artifact::{
    ModelMetadata, FEATURE_NAMES_FILE, METADATA_FILE, MODEL_FILE, SCALER_FILE,
};
use carbonscorex::score_service::CarbonScoreService;
use carbonscorex::scoring_model::{
    DecisionTree, FeatureScaler, ScoringModel, TreeEnsemble, TreeNode,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt; // for .oneshot()

fn fallback_app() -> Router {
    let service = Arc::new(CarbonScoreService::fallback_only("integration test"));
    build_score_router(service)
}

fn model_app(dir: &Path) -> Router {
    write_model_artifacts(dir);
    let service = Arc::new(CarbonScoreService::from_artifact_dir(dir));
    assert!(service.model_loaded(), "artifact fixture should load");
    build_score_router(service)
}

/// Seven-feature single-tree artifact: renewable share above 50 scores 90,
/// otherwise 40.
fn write_model_artifacts(dir: &Path) {
    let feature_names = vec![
        "energy_consumption".to_string(),
        "renewable_energy_pct".to_string(),
        "waste_recycled_pct".to_string(),
        "emissions_co2".to_string(),
        "water_usage".to_string(),
        "employee_count".to_string(),
        "production_volume".to_string(),
    ];

    let model = ScoringModel::GradientBoosted(TreeEnsemble {
        trees: vec![DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 1,
                    threshold: 50.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 40.0 },
                TreeNode::Leaf { value: 90.0 },
            ],
        }],
        base_score: 0.0,
        average: false,
        feature_importances: vec![0.10, 0.50, 0.15, 0.10, 0.05, 0.05, 0.05],
    });
    let scaler = FeatureScaler::identity(feature_names.len());
    let schema = FeatureSchema::new(feature_names.clone());
    let metadata = ModelMetadata {
        model_kind: "xgboost".to_string(),
        n_features: feature_names.len(),
        test_mae: Some(2.5),
        test_r2: Some(0.9),
        feature_names,
        trained_at: None,
    };

    std::fs::write(dir.join(MODEL_FILE), serde_json::to_string(&model).unwrap()).unwrap();
    std::fs::write(dir.join(SCALER_FILE), serde_json::to_string(&scaler).unwrap()).unwrap();
    std::fs::write(
        dir.join(FEATURE_NAMES_FILE),
        serde_json::to_string(&schema).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.join(METADATA_FILE),
        serde_json::to_string(&metadata).unwrap(),
    )
    .unwrap();
}

async fn send_json(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .uri(uri)
        .method(method)
        .header("Content-Type", "application/json");
    let request = match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn root_reports_the_service_banner() {
    let (status, body) = send_json(fallback_app(), "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "CarbonScoreX ML Service");
    assert_eq!(body["status"], "operational");
}

#[tokio::test]
async fn health_reports_fallback_when_no_model_is_loaded() {
    let (status, body) = send_json(fallback_app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["model_type"], "fallback");
}

#[tokio::test]
async fn predict_without_model_uses_the_rule_based_path() {
    let payload = json!({
        "renewable_energy_pct": 65,
        "waste_recycled_pct": 70,
        "emissions_co2": 2000,
        "energy_consumption": 5000
    });

    let (status, body) = send_json(fallback_app(), "POST", "/predict", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 89.25);
    assert_eq!(body["category"], "Excellent");
    assert_eq!(body["confidence"], 0.7);
    assert_eq!(body["model_version"], FALLBACK_MODEL_VERSION);
    assert_eq!(body["explanation"]["method"], "rule_based_fallback");
}

#[tokio::test]
async fn predict_rejects_out_of_range_percentages() {
    let payload = json!({ "renewable_energy_pct": 150 });

    let (status, body) = send_json(fallback_app(), "POST", "/predict", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn batch_predict_handles_the_empty_batch() {
    let (status, body) = send_json(fallback_app(), "POST", "/batch-predict", Some(json!([]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["predictions"], json!([]));
}

#[tokio::test]
async fn batch_predict_preserves_input_order() {
    let payload = json!([
        { "renewable_energy_pct": 0 },
        { "renewable_energy_pct": 40 },
        { "renewable_energy_pct": 100 }
    ]);

    let (status, body) = send_json(fallback_app(), "POST", "/batch-predict", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    let scores: Vec<f64> = body["predictions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["score"].as_f64().unwrap())
        .collect();
    assert_eq!(scores, vec![50.0, 60.0, 75.0]);
}

#[tokio::test]
async fn batch_predict_reports_bad_records_inline() {
    let payload = json!([
        { "renewable_energy_pct": 30 },
        { "renewable_energy_pct": 500 },
        { "renewable_energy_pct": 90 }
    ]);

    let (status, body) = send_json(fallback_app(), "POST", "/batch-predict", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    let predictions = body["predictions"].as_array().unwrap();
    assert!(predictions[0].get("score").is_some());
    assert!(predictions[1].get("error").is_some());
    assert!(predictions[2].get("score").is_some());
}

#[tokio::test]
async fn model_info_reports_the_fallback_notice() {
    let (status, body) = send_json(fallback_app(), "GET", "/model-info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_type"], "fallback");
    assert!(body["message"].as_str().unwrap().contains("rule-based"));
}

#[tokio::test]
async fn loaded_model_serves_predictions_and_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let app = model_app(dir.path());

    let (status, body) = send_json(app.clone(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["model_type"], "xgboost");

    let (status, body) = send_json(app.clone(), "GET", "/model-info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_type"], "xgboost");
    assert_eq!(body["n_features"], 7);
    assert_eq!(body["test_r2"], 0.9);

    let payload = json!({ "renewable_energy_pct": 65 });
    let (status, body) = send_json(app.clone(), "POST", "/predict", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 90.0);
    assert_eq!(body["model_version"], "xgboost");
    assert_eq!(body["explanation"]["method"], "model_driven");
    assert_eq!(
        body["explanation"]["top_features"][0]["name"],
        "renewable_energy_pct"
    );

    let (status, body) = send_json(app, "GET", "/readyz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
    assert_eq!(body["mode"], "model");
}

#[tokio::test]
async fn versioned_alias_routes_serve_the_same_handler() {
    let payload = json!({ "renewable_energy_pct": 65 });
    let (status, body) = send_json(fallback_app(), "POST", "/v1/predict", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_version"], FALLBACK_MODEL_VERSION);
}

#[tokio::test]
async fn alternate_metric_keys_reach_the_model_through_aliases() {
    let dir = tempfile::tempdir().unwrap();
    let app = model_app(dir.path());

    // renewable_pct aliases renewable_energy_pct; 80 > 50 routes high
    let payload = json!({ "renewable_pct": 80 });
    let (status, body) = send_json(app, "POST", "/predict", Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 90.0);
}
