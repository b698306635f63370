use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::Value;

use crate::{error::ApiError, forecast, generation::GeneratorState, prompt, Result};

#[derive(Debug, Serialize)]
pub struct ObservationResponse {
    pub observation: String,
}

/// POST /generate-ai-observations
/// Validates the forecast payload, renders it into the analyst prompt and
/// relays the generated narrative.
pub async fn generate_observations(
    State(generator): State<GeneratorState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse> {
    let generator = generator.ok_or(ApiError::ClientUnavailable)?;

    // Absent or non-array forecastData is treated the same as empty.
    let entries = body
        .get("forecastData")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    if entries.is_empty() {
        return Err(ApiError::NoForecastData);
    }

    forecast::validate_entries(&entries)?;

    let summary = forecast::render_summary(&entries)?;
    let user_prompt = prompt::build_prompt(&summary);

    let observation = generator
        .generate(prompt::SYSTEM_PROMPT, &user_prompt)
        .await
        .map_err(|e| ApiError::Upstream(format!("{e:#}")))?;

    Ok(Json(ObservationResponse {
        observation: observation.trim().to_string(),
    }))
}

/// GET /health
/// Health check endpoint. Reports liveness only, independent of the
/// generation-client state.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "message": "Forecast insight service is running"
    }))
}
