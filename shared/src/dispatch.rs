//! Fan-out of one user message to both bot slots.

use crate::models::{
    BotSlot, ErrorResponse, GenerationSettings, MISSING_CREDENTIAL_MESSAGE, Message, Turn,
};
use async_trait::async_trait;
use thiserror::Error;

/// A successful reply from the completion gateway.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub text: String,
    pub model_id: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompletionError {
    #[error("{}", MISSING_CREDENTIAL_MESSAGE)]
    MissingCredential,
    #[error("Completion failed: {0}")]
    Remote(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("{}", MISSING_CREDENTIAL_MESSAGE)]
    MissingCredential,
}

/// Issues one completion call for a bot slot.
///
/// Futures are not required to be `Send`; in the browser they run on the UI thread.
#[async_trait(?Send)]
pub trait CompletionClient {
    async fn complete(
        &self,
        slot: BotSlot,
        message: &str,
        settings: &GenerationSettings,
    ) -> Result<Completion, CompletionError>;
}

/// Map a non-2xx gateway reply to a completion error.
///
/// Only a 400 carrying the missing-credential text aborts the turn; any other
/// status, or a body that is not `{ error }`, fails just that slot.
pub fn classify_failure(status: u16, body: Option<ErrorResponse>) -> CompletionError {
    match body {
        Some(body) if status == 400 && body.error == MISSING_CREDENTIAL_MESSAGE => {
            CompletionError::MissingCredential
        }
        Some(body) => CompletionError::Remote(body.error),
        None => CompletionError::Remote(format!("HTTP {status}")),
    }
}

/// Send `text` to both slots concurrently and build the turn once both settle.
///
/// A failing slot is recorded as the failure sentinel without affecting the
/// other slot. A missing credential aborts the whole turn so nothing is appended.
pub async fn dispatch_turn<C>(
    client: &C,
    text: &str,
    bot_a: &GenerationSettings,
    bot_b: &GenerationSettings,
) -> Result<Turn, DispatchError>
where
    C: CompletionClient + ?Sized,
{
    let text = text.trim();
    if text.is_empty() {
        return Err(DispatchError::EmptyMessage);
    }

    let (a, b) = futures::future::join(
        client.complete(BotSlot::A, text, bot_a),
        client.complete(BotSlot::B, text, bot_b),
    )
    .await;

    if matches!(a, Err(CompletionError::MissingCredential))
        || matches!(b, Err(CompletionError::MissingCredential))
    {
        return Err(DispatchError::MissingCredential);
    }

    Ok(Turn {
        user: Message::user(text),
        bot_a: outcome(BotSlot::A, a),
        bot_b: outcome(BotSlot::B, b),
    })
}

fn outcome(slot: BotSlot, result: Result<Completion, CompletionError>) -> Message {
    match result {
        Ok(completion) => Message::reply(slot, completion.text, completion.model_id),
        Err(e) => {
            tracing::error!("{} failed: {}", slot, e);
            Message::failure(slot)
        }
    }
}
