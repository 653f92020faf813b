use serde::{Deserialize, Serialize};

use super::{BotSlot, GenerationSettings};

/// Error text the gateway returns when no API key resolves.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "API key is required";

/// Header carrying the caller's API key to the completion gateway.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Body of `POST /api/chat`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub message: String,
    pub bot_type: BotSlot,
    #[serde(default)]
    pub settings: GenerationSettings,
    #[serde(default)]
    pub custom_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    pub bot_type: BotSlot,
    pub response: String,
    pub model_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
