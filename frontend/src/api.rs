use async_trait::async_trait;
use gloo_net::http::Request;
use shared::dispatch::{Completion, CompletionClient, CompletionError, classify_failure};
use shared::models::*;

const API_BASE: &str = "/api";

/// Calls the completion gateway with the credentials captured when the turn started.
pub struct GatewayClient {
    credentials: Credentials,
}

impl GatewayClient {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait(?Send)]
impl CompletionClient for GatewayClient {
    async fn complete(
        &self,
        slot: BotSlot,
        message: &str,
        settings: &GenerationSettings,
    ) -> Result<Completion, CompletionError> {
        let payload = CompletionRequest {
            message: message.to_string(),
            bot_type: slot,
            settings: settings.clone(),
            custom_url: Some(self.credentials.base_url.clone()),
        };

        let mut builder = Request::post(&format!("{}/chat", API_BASE));
        if !self.credentials.api_key.is_empty() {
            builder = builder.header(API_KEY_HEADER, &self.credentials.api_key);
        }
        let resp = builder
            .json(&payload)
            .map_err(remote)?
            .send()
            .await
            .map_err(remote)?;

        if resp.ok() {
            let body: CompletionResponse = resp.json().await.map_err(remote)?;
            return Ok(Completion {
                text: body.response,
                model_id: body.model_id,
            });
        }

        let status = resp.status();
        let body = resp.json::<ErrorResponse>().await.ok();
        Err(classify_failure(status, body))
    }
}

fn remote(e: gloo_net::Error) -> CompletionError {
    CompletionError::Remote(e.to_string())
}
