// HTTP API for crop recommendations
//
// Thin JSON layer over the shared Recommender. Prediction runs on the
// blocking pool; identical snapshots are served from a short-lived cache.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::artifacts::ArtifactPaths;
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::explanation::PredictionResult;
use crate::recommender::Recommender;
use crate::snapshot::{InputSnapshot, Reading};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    /// Serialized snapshot -> result
    pub cache: Cache<String, Arc<PredictionResult>>,
}

impl AppState {
    pub fn new(config: &AdvisorConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading recommender from {}", config.model_dir.display());
        let recommender = Recommender::load(&ArtifactPaths::in_dir(&config.model_dir))?.with_top_k(config.top_k);
        Ok(Self::from_recommender(recommender))
    }

    pub fn from_recommender(recommender: Recommender) -> Self {
        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(300))
            .build();

        Self {
            recommender: Arc::new(recommender),
            cache,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/vocabulary", get(get_vocabulary))
        .route("/api/defaults", get(get_defaults))
        .route("/api/predict", post(predict))
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[derive(Serialize)]
struct ReadingInfo {
    key: &'static str,
    label: &'static str,
    unit: &'static str,
    min: f64,
    max: f64,
    default: f64,
}

async fn get_vocabulary(State(state): State<AppState>) -> Json<serde_json::Value> {
    let rec = &state.recommender;
    let readings: Vec<ReadingInfo> = Reading::ALL
        .iter()
        .map(|r| {
            let range = r.range();
            ReadingInfo {
                key: r.key(),
                label: r.label(),
                unit: r.unit(),
                min: range.min,
                max: range.max,
                default: r.default_value(),
            }
        })
        .collect();

    Json(serde_json::json!({
        "regions": rec.regions().classes(),
        "seasons": rec.seasons().classes(),
        "crops": rec.crops().classes(),
        "readings": readings,
    }))
}

async fn get_defaults(State(state): State<AppState>) -> Json<InputSnapshot> {
    Json(state.recommender.default_snapshot())
}

async fn predict(
    State(state): State<AppState>,
    Json(snapshot): Json<InputSnapshot>,
) -> Result<Json<PredictionResult>, AppError> {
    snapshot.validate()?;

    let key = serde_json::to_string(&snapshot).map_err(|e| AppError::Internal(e.to_string()))?;
    if let Some(cached) = state.cache.get(&key).await {
        tracing::debug!("Cache hit for prediction");
        return Ok(Json((*cached).clone()));
    }

    // CPU-bound work: run in blocking thread pool
    let recommender = state.recommender.clone();
    let result = tokio::task::spawn_blocking(move || recommender.recommend(&snapshot))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    state.cache.insert(key, Arc::new(result.clone())).await;
    Ok(Json(result))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadInput(String),
    Internal(String),
}

impl From<AdvisorError> for AppError {
    fn from(err: AdvisorError) -> Self {
        match err {
            AdvisorError::UnknownCategory { .. } | AdvisorError::OutOfRange { .. } => {
                AppError::BadInput(err.to_string())
            }
            other => {
                tracing::warn!("Prediction error: {}", other);
                AppError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadInput(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
