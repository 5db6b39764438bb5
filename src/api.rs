use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::analyze::{Analysis, Analyzers, EnsembleResult};
use crate::debug;
use crate::error::SentimentError;
use crate::metrics::{self, Metrics};
use crate::samples::{SampleCategory, SAMPLES};
use crate::sentiment::Algorithm;

/// `DEBUG_ROUTES=1` mounts `/debug/history` and `/debug/stats`.
pub const ENV_DEBUG_ROUTES: &str = "DEBUG_ROUTES";

#[derive(Clone)]
pub struct AppState {
    analyzers: Arc<Analyzers>,
    metrics: Option<Metrics>,
}

impl AppState {
    pub fn new(analyzers: Analyzers) -> Self {
        Self {
            analyzers: Arc::new(analyzers),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Analyzers from the environment plus the Prometheus recorder.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(Analyzers::from_env()?).with_metrics(Metrics::init()?))
    }

    pub fn analyzers(&self) -> &Analyzers {
        &self.analyzers
    }
}

pub fn create_router(state: AppState) -> Router {
    let metrics_routes = state.metrics.as_ref().map(Metrics::router);

    let mut router = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .route("/analyze/{algorithm}", post(analyze_with))
        .route("/batch", post(analyze_batch))
        .route("/samples", get(samples))
        .with_state(state);

    if let Some(m) = metrics_routes {
        router = router.merge(m);
    }
    if std::env::var(ENV_DEBUG_ROUTES).ok().as_deref() == Some("1") {
        router = router.merge(debug::router());
    }

    router.layer(CorsLayer::very_permissive())
}

impl IntoResponse for SentimentError {
    fn into_response(self) -> Response {
        let status = match self {
            SentimentError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SentimentError::UnknownAlgorithm(_) => StatusCode::BAD_REQUEST,
            SentimentError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn reject(err: SentimentError) -> SentimentError {
    warn!(target: "sentiment", error = %err, "request rejected");
    metrics::record_rejected();
    debug::record_rejected();
    err
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `text` must be present and a JSON string; an empty string is fine.
fn text_field(body: &Value) -> Result<&str, SentimentError> {
    match body.get("text") {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(SentimentError::InvalidInput(format!(
            "`text` must be a string, got {}",
            kind_of(other)
        ))),
        None => Err(SentimentError::InvalidInput("missing `text` field".into())),
    }
}

fn algorithm_field(body: &Value) -> Result<Algorithm, SentimentError> {
    match body.get("algorithm") {
        None | Some(Value::Null) => Ok(Algorithm::Ensemble),
        Some(Value::String(name)) => name.parse(),
        Some(other) => Err(SentimentError::InvalidInput(format!(
            "`algorithm` must be a string, got {}",
            kind_of(other)
        ))),
    }
}

fn run(state: &AppState, algorithm: Algorithm, text: &str) -> Analysis {
    metrics::record_analysis(algorithm);
    state.analyzers.analyze(algorithm, text)
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Analysis>, SentimentError> {
    let algorithm = algorithm_field(&body).map_err(reject)?;
    let text = text_field(&body).map_err(reject)?;
    debug::record_request(false);
    Ok(Json(run(&state, algorithm, text)))
}

async fn analyze_with(
    State(state): State<AppState>,
    Path(algorithm): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Analysis>, SentimentError> {
    let algorithm: Algorithm = algorithm.parse().map_err(reject)?;
    let text = text_field(&body).map_err(reject)?;
    debug::record_request(false);
    Ok(Json(run(&state, algorithm, text)))
}

/// Every item is validated before any is analyzed, so one bad entry rejects the batch.
async fn analyze_batch(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Vec<EnsembleResult>>, SentimentError> {
    let items = body.as_array().ok_or_else(|| {
        reject(SentimentError::InvalidInput(format!(
            "batch body must be an array, got {}",
            kind_of(&body)
        )))
    })?;

    let texts = items
        .iter()
        .map(text_field)
        .collect::<Result<Vec<_>, _>>()
        .map_err(reject)?;

    debug::record_request(true);
    let ensemble = state.analyzers.ensemble();
    let out = texts
        .into_iter()
        .map(|text| {
            metrics::record_analysis(Algorithm::Ensemble);
            let r = ensemble.analyze(text);
            debug::dev_log_analysis(Algorithm::Ensemble, text, r.score, r.confidence);
            r
        })
        .collect();
    Ok(Json(out))
}

async fn samples() -> Json<&'static [SampleCategory]> {
    Json(&SAMPLES[..])
}
