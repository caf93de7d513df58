//! SmartURL ML Service
//!
//! Dual-model malicious URL classifier for the link shortener.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SMARTURL ML SERVICE                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐        ┌──────────────────────────────────┐ │
//! │  │  HTTP     │        │  Training (blocking task, once)  │ │
//! │  │  (Axum)   │        │  CSV -> features -> RF + NN      │ │
//! │  └─────┬─────┘        └────────────────┬─────────────────┘ │
//! │        └──────────────┬────────────────┘                    │
//! │                       ▼                                     │
//! │               ┌───────────────┐                             │
//! │               │ DecisionEngine│                             │
//! │               └───────────────┘                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use smarturl_ml_core::constants::{APP_NAME, APP_VERSION};
use smarturl_ml_core::{train_from_csv, DecisionEngine, TrainingConfig};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

const DEFAULT_LOG_FILTER: &str = "smarturl_ml_server=debug,smarturl_ml_core=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    init_tracing(&config);

    tracing::info!("{} Service v{} starting...", APP_NAME, APP_VERSION);
    tracing::info!("Dataset: {}", config.dataset_path);

    let engine = Arc::new(DecisionEngine::new());
    spawn_training(Arc::clone(&engine), &config);

    // Build application state
    let state = AppState {
        engine,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server; /ml/* answers 503 until training completes
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing(config: &config::Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    // `init` also routes `log` records from the core crate
    if config.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Train once on a blocking thread. Failure leaves the engine untrained.
fn spawn_training(engine: Arc<DecisionEngine>, config: &config::Config) {
    let dataset_path = config.dataset_path.clone();
    let training = TrainingConfig {
        sample_size: config.training_sample_size,
        ..TrainingConfig::from_env()
    };

    tokio::task::spawn_blocking(move || {
        let started = Instant::now();
        match train_from_csv(&engine, &dataset_path, &training) {
            Ok(stats) => tracing::info!(
                elapsed_secs = started.elapsed().as_secs_f64(),
                rf_accuracy = stats.rf_accuracy,
                nn_accuracy = stats.nn_accuracy,
                "🎉 Both models trained"
            ),
            Err(e) => tracing::error!("Training failed, classification stays unavailable: {}", e),
        }
    });
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DecisionEngine>,
    pub config: config::Config,
}

fn cors_layer(config: &config::Config) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/ml/classify", post(handlers::classify::classify))
        .route("/ml/status", get(handlers::classify::status))
        .route("/ml/stats", get(handlers::stats::get))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
