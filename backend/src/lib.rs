mod config;
mod error;
mod handlers;
mod openai;

pub use crate::config::{CredentialPrecedence, DEFAULT_MODEL, GatewayConfig, ResolvedEndpoint};
pub use crate::error::GatewayError;
pub use crate::openai::{CompletionBackend, GenerationParams, OpenAiBackend};

use crate::handlers::chat;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub backend: Arc<dyn CompletionBackend>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config: Arc::new(config),
            backend: Arc::new(OpenAiBackend),
        }
    }
}

pub fn init(router: Router<AppState>, config: GatewayConfig) -> Router<()> {
    with_state(router, AppState::new(config))
}

pub fn with_state(router: Router<AppState>, state: AppState) -> Router<()> {
    router
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
