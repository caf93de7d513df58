use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use smarturl_ml_core::logic::model::{ModelLayout, ProbabilityModel, StandardScaler};
use smarturl_ml_core::logic::stats::BinaryMetrics;
use smarturl_ml_core::{DecisionEngine, TrainedModels, TrainingStats, FEATURE_COUNT};
use tower::ServiceExt;

use crate::config::Config;
use crate::{create_router, AppState};

struct Fixed(f32);

impl ProbabilityModel for Fixed {
    fn predict_probability(&self, _features: &[f32]) -> f32 {
        self.0
    }

    fn layout(&self) -> ModelLayout {
        ModelLayout::current()
    }
}

fn untrained_app() -> Router {
    create_router(AppState {
        engine: Arc::new(DecisionEngine::new()),
        config: Config::default(),
    })
}

fn trained_app(forest: f32, neural: f32) -> Router {
    let engine = DecisionEngine::new();
    let stats = TrainingStats::new(
        BinaryMetrics { accuracy: 0.95, precision: 0.94, recall: 0.93, f1: 0.935 },
        BinaryMetrics { accuracy: 0.91, precision: 0.9, recall: 0.88, f1: 0.8899 },
        40_000,
        10_000,
    );
    engine
        .install(
            TrainedModels::new(Fixed(forest), Fixed(neural), StandardScaler::identity(FEATURE_COUNT)),
            stats,
        )
        .unwrap();

    create_router(AppState {
        engine: Arc::new(engine),
        config: Config::default(),
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn classify_request(url: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ml/classify")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "url": url }).to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_reports_untrained() {
    let (status, body) = send(untrained_app(), get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["model_trained"], false);
}

#[tokio::test]
async fn test_classify_before_training_is_503() {
    let (status, body) = send(untrained_app(), classify_request("google.com")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["detail"], "Models not trained yet.");
    assert_eq!(body["status"], 503);
}

#[tokio::test]
async fn test_stats_before_training_is_503() {
    let (status, body) = send(untrained_app(), get_request("/ml/stats")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["detail"], "Models not trained yet.");
}

#[tokio::test]
async fn test_classify_allowlisted() {
    let (status, body) = send(trained_app(0.99, 0.99), classify_request("google.com")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "google.com");
    assert_eq!(body["is_malicious"], false);
    assert_eq!(body["final_verdict"], "SAFE");
    assert_eq!(body["rf_confidence"], 0.01);
    assert_eq!(body["nn_confidence"], 0.01);
    assert_eq!(body["source"], "allowlist");
    assert_eq!(body["triggered_features"], json!(["No HTTPS"]));
}

#[tokio::test]
async fn test_classify_both_models_agree() {
    let url = "http://paypal-login-verify.com/account";
    let (status, body) = send(trained_app(0.9, 0.9), classify_request(url)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_malicious"], true);
    assert_eq!(body["final_verdict"], "MALICIOUS");
    assert_eq!(body["rf_prediction"], true);
    assert_eq!(body["nn_confidence"], 0.9);
    assert_eq!(body["source"], "models");
    assert_eq!(
        body["triggered_features"],
        json!(["No HTTPS", "Suspicious words: login, verify, account"])
    );
}

#[tokio::test]
async fn test_classify_disagreement_is_safe() {
    let (status, body) = send(
        trained_app(0.9, 0.2),
        classify_request("http://paypal-login-verify.com/account"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["final_verdict"], "SAFE");
    assert_eq!(body["rf_prediction"], true);
    assert_eq!(body["nn_prediction"], false);
}

#[tokio::test]
async fn test_classify_rejects_blank_url() {
    let (status, body) = send(trained_app(0.1, 0.1), classify_request("   ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_stats_after_training() {
    let (status, body) = send(trained_app(0.1, 0.1), get_request("/ml/stats")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rf_accuracy"], 0.95);
    assert_eq!(body["nn_f1"], 0.8899);
    assert_eq!(body["training_samples"], 40_000);
    assert_eq!(body["test_samples"], 10_000);
}

#[tokio::test]
async fn test_status_reports_layout() {
    let (status, body) = send(trained_app(0.1, 0.1), get_request("/ml/status")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trained"], true);
    assert_eq!(body["layout"]["feature_count"], 13);
    assert_eq!(body["allowlist_size"], 16);
}
