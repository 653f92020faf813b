use crate::AppState;
use crate::config::DEFAULT_MODEL;
use crate::error::GatewayError;
use crate::openai::GenerationParams;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use shared::models::{API_KEY_HEADER, CompletionRequest, CompletionResponse};

pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CompletionRequest>, JsonRejection>,
) -> Result<Json<CompletionResponse>, GatewayError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!("Rejected malformed chat request: {}", rejection.body_text());
        GatewayError::InvalidRequest(rejection.body_text())
    })?;
    let request_key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    let endpoint = state
        .config
        .resolve(request_key, payload.custom_url.as_deref())
        .inspect_err(|_| {
            tracing::warn!("Rejected {} request without API key", payload.bot_type);
        })?;

    let model_id = match payload.settings.model_id.trim() {
        "" => DEFAULT_MODEL.to_string(),
        model => model.to_string(),
    };
    tracing::info!(
        "{} -> {} at {} (temperature {}, top_p {})",
        payload.bot_type,
        model_id,
        endpoint.base_url,
        payload.settings.temperature,
        payload.settings.top_p
    );

    let params = GenerationParams {
        model: model_id.clone(),
        prompt: payload.message,
        temperature: payload.settings.temperature,
        top_p: payload.settings.top_p,
    };
    let response = state
        .backend
        .generate(&endpoint, params)
        .await
        .inspect_err(|e| {
            tracing::error!("{} completion failed: {:?}", payload.bot_type, e);
        })?;

    Ok(Json(CompletionResponse {
        bot_type: payload.bot_type,
        response,
        model_id,
    }))
}
