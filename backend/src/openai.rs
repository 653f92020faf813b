use crate::config::ResolvedEndpoint;
use crate::error::GatewayError;
use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;

/// Parameters forwarded to the remote model. `top_k` has no counterpart in
/// the OpenAI chat API and is never sent.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub top_p: f32,
}

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run one completion and return the generated text.
    async fn generate(
        &self,
        endpoint: &ResolvedEndpoint,
        params: GenerationParams,
    ) -> Result<String, GatewayError>;
}

/// Talks to any OpenAI-compatible chat completion endpoint.
pub struct OpenAiBackend;

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn generate(
        &self,
        endpoint: &ResolvedEndpoint,
        params: GenerationParams,
    ) -> Result<String, GatewayError> {
        let config = OpenAIConfig::new()
            .with_api_key(endpoint.api_key.clone())
            .with_api_base(endpoint.base_url.clone());
        let client = Client::with_config(config);

        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(params.prompt)
            .build()
            .map_err(remote)?;
        let request = CreateChatCompletionRequestArgs::default()
            .model(params.model)
            .messages(vec![ChatCompletionRequestMessage::User(user)])
            .temperature(params.temperature)
            .top_p(params.top_p)
            .build()
            .map_err(remote)?;

        let response = client.chat().create(request).await.map_err(remote)?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

fn remote(e: OpenAIError) -> GatewayError {
    match e {
        OpenAIError::ApiError(api) => GatewayError::Remote(api.api_error.message),
        other => GatewayError::Remote(other.to_string()),
    }
}
