//! HTTP serving adapter for the summarization model
//!
//! A thin axum surface: `POST /predict` takes a prompt, runs the model
//! behind the [`SummaryModel`] trait, and validates the output against the
//! summary contract before answering. Outputs violating the declared length
//! bounds are rejected with a client-visible error, never coerced.

pub mod error;
pub mod model;
pub mod prompt;

pub use error::ServerError;
pub use model::{OpenAiCompatModel, StaticModel, SummaryModel};

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use sumprep_prep::SummaryPayload;
use tracing::info;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn SummaryModel>,
}

impl AppState {
    pub fn new(model: Arc<dyn SummaryModel>) -> Self {
        Self { model }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub output: SummaryPayload,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ServerError> {
    let user_prompt = prompt::build_user_prompt(&request.prompt);
    let raw = state
        .model
        .complete(prompt::SYSTEM_PROMPT, &user_prompt)
        .await?;
    let output = SummaryPayload::new(raw)?;
    Ok(Json(PredictResponse { output }))
}

/// Bind and serve until shutdown.
pub async fn serve(state: AppState, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving summarization API on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
