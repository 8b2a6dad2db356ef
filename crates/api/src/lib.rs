//! Prediction API Server
//!
//! Accepts partial feature sets over HTTP, fills the gaps from the schema
//! defaults and relays the scoring service's prediction.

use anyhow::{Context, Result};
use axum::{
    middleware,
    routing::get,
    Router,
};
use feature_engine::{FeatureSchema, VectorAssembler};
use inference_engine::{InferenceEngine, MockReply};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod error;
pub mod input;
mod routes;
pub mod settings;
pub mod telemetry;

pub use error::ApiError;
pub use routes::predictions::PredictionResponse;
pub use settings::{BackendKind, Settings};

/// Application state shared across handlers
pub struct AppState {
    /// Schema-bound vector assembler
    pub assembler: VectorAssembler,
    /// Scoring service client
    pub engine: InferenceEngine,
    /// Prometheus exposition handle
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Create new application state
    pub fn new(assembler: VectorAssembler, engine: InferenceEngine, metrics: PrometheusHandle) -> Self {
        Self {
            assembler,
            engine,
            metrics,
        }
    }

    /// Build state from settings.
    ///
    /// Fails if the feature schema does not pass its integrity check or the
    /// inference backend cannot be configured.
    pub fn from_settings(settings: &Settings, metrics: PrometheusHandle) -> Result<Self> {
        let schema = FeatureSchema::breast_cancer().context("feature schema integrity check failed")?;
        let strategy = settings.features.strategy;
        info!(
            "Feature schema ready: {} features, {} defaults",
            schema.len(),
            strategy
        );

        let assembler = VectorAssembler::new(Arc::new(schema), strategy);

        let inference = &settings.inference;
        let engine = match inference.backend {
            BackendKind::Http => {
                InferenceEngine::http(inference.http_config(), inference.prediction_field.clone())
                    .context("failed to configure inference backend")?
            }
            BackendKind::Mock => InferenceEngine::mock(
                MockReply::Fixed(inference.mock_prediction.clone()),
                inference.prediction_field.clone(),
            ),
        };
        info!("Inference backend: {}", engine.describe());

        Ok(Self::new(assembler, engine, metrics))
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let counted = Router::new()
        .route("/status", get(routes::status::get_status))
        .route("/predict", get(routes::predictions::predict_from_query))
        .route(
            "/predict/json",
            get(routes::predictions::predict_from_json).post(routes::predictions::predict_from_json),
        )
        .route_layer(middleware::from_fn(telemetry::track_requests));

    Router::new()
        .merge(counted)
        .route("/metrics", get(telemetry::metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging
pub fn init_logging(settings: &settings::LoggingSettings) -> Result<()> {
    let level: Level = settings
        .level
        .parse()
        .with_context(|| format!("invalid log level '{}'", settings.level))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = if settings.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.context("failed to set tracing subscriber")?;

    Ok(())
}

/// Serve on an already bound listener until Ctrl-C
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let app = create_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Run the server
pub async fn run_server(settings: &Settings, metrics: PrometheusHandle) -> Result<()> {
    let state = Arc::new(AppState::from_settings(settings, metrics)?);

    let listener = TcpListener::bind(settings.server.bind.as_str())
        .await
        .with_context(|| format!("failed to bind {}", settings.server.bind))?;
    info!("Starting API server on {}", settings.server.bind);

    serve(listener, state).await?;
    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the task is dropped.
        std::future::pending::<()>().await;
    }
}
