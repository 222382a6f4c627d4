//! HTTP surface: `POST /predict` and `GET /health`.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, signal};

use crate::scorer::{Scorer, ScorerInfo};

mod error;

pub use error::{ErrorResponse, ServiceError};

pub const PREDICT_PATH: &str = "/predict";
pub const HEALTH_PATH: &str = "/health";

/// Shared state handed to every handler.
///
/// The scorer is immutable, so handlers read it concurrently without locks.
#[derive(Clone)]
pub struct AppState {
    pub scorer: Scorer,
}

impl AppState {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }
}

/// Name of the request field holding the text to score.
pub const TEXT_FIELD: &str = "text";

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub score: f32,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub info: ScorerInfo,
}

/// Creates the router with all routes bound to `app_state`.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route(PREDICT_PATH, post(predict_handler))
        .route(HEALTH_PATH, get(health))
        .with_state(app_state)
}

/// Serves requests on `tcp_listener` until Ctrl+C or SIGTERM.
pub async fn run_server(app_state: AppState, tcp_listener: TcpListener) -> anyhow::Result<()> {
    let app = create_router(app_state);
    axum::serve(tcp_listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutting down server...");
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        info: state.scorer.info(),
    })
}

/// Scores the `text` field of a JSON body.
///
/// The body is parsed as JSON whatever its `Content-Type`. Every failure,
/// from an unreadable body to a model error, becomes a `500` with
/// `{"error": "<message>"}`.
pub async fn predict_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PredictResponse>, ServiceError> {
    let body = body.map_err(|e| ServiceError::UnreadableBody(e.body_text()))?;
    let text = extract_text(&body)?;

    // Inference is CPU-bound; keep it off the async workers.
    let scorer = state.scorer.clone();
    let (text, score) = tokio::task::spawn_blocking(move || {
        let score = scorer.score(&text);
        (text, score)
    })
    .await
    .map_err(|e| ServiceError::Internal(format!("Scoring task failed: {}", e)))?;
    let score = score?;

    info!("Received text '{}', predicted score: {}", text, score);
    Ok(Json(PredictResponse { score }))
}

/// Pulls the `text` string out of a JSON object body.
///
/// Only an object is accepted, and a repeated key resolves to its last value.
fn extract_text(body: &[u8]) -> Result<String, ServiceError> {
    let mut object: Map<String, Value> = serde_json::from_slice(body)?;
    match object.remove(TEXT_FIELD) {
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(ServiceError::InvalidField {
            field: TEXT_FIELD,
            found: json_type_name(&other),
        }),
        None => Err(ServiceError::MissingField(TEXT_FIELD)),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
