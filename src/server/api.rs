//! HTTP handlers for the triage API
//!
//! - POST /classify — mask PII, then predict the support category
//! - POST /mask     — mask PII only
//! - GET  /health   — liveness and model status

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::state::AppState;
use crate::error::{Result, TriageError};
use crate::types::{ClassificationResult, DetectedEntity};

/// Request body for both endpoints
#[derive(Debug, Deserialize)]
pub struct EmailInput {
    pub input_email_body: String,
}

/// Response from POST /mask
#[derive(Debug, Serialize)]
pub struct MaskResponse {
    pub input_email_body: String,
    pub masked_email: String,
    pub list_of_masked_entities: Vec<DetectedEntity>,
}

/// Response from GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_loaded_at: Option<String>,
    pub remap_labels: bool,
    pub started_at: String,
}

fn extract(payload: std::result::Result<Json<EmailInput>, JsonRejection>) -> Result<EmailInput> {
    payload
        .map(|Json(input)| input)
        .map_err(|e| TriageError::InvalidInput(e.body_text()))
}

/// POST /classify
pub async fn classify(
    State(state): State<AppState>,
    payload: std::result::Result<Json<EmailInput>, JsonRejection>,
) -> Result<Json<ClassificationResult>> {
    let input = extract(payload)?;
    let request_id = uuid::Uuid::new_v4();

    match state.pipeline.classify(&input.input_email_body) {
        Ok(result) => {
            tracing::info!(
                %request_id,
                entities = result.list_of_masked_entities.len(),
                category = %result.category_of_the_email,
                "Classified email"
            );
            Ok(Json(result))
        }
        Err(e) => {
            tracing::error!(%request_id, error = %e, "Classification failed");
            Err(e)
        }
    }
}

/// POST /mask
pub async fn mask(
    State(state): State<AppState>,
    payload: std::result::Result<Json<EmailInput>, JsonRejection>,
) -> Result<Json<MaskResponse>> {
    let input = extract(payload)?;
    let result = state.pipeline.mask(&input.input_email_body);

    Ok(Json(MaskResponse {
        input_email_body: input.input_email_body,
        masked_email: result.masked_text,
        list_of_masked_entities: result.entities,
    }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let predictor = state.pipeline.predictor();
    let model = predictor.model();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: predictor.is_available(),
        model_source: model.map(|m| m.source().display().to_string()),
        model_loaded_at: model.map(|m| m.loaded_at().to_rfc3339()),
        remap_labels: state.config.remap_labels,
        started_at: state.started_at.to_rfc3339(),
    })
}
