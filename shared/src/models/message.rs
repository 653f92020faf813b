use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Text recorded in place of a bot reply when its completion call fails.
pub const FAILURE_SENTINEL: &str = "Error: Failed to get response";

/// One of the two independently configured bots being compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BotSlot {
    #[serde(rename = "Bot A")]
    A,
    #[serde(rename = "Bot B")]
    B,
}

impl BotSlot {
    pub const ALL: [BotSlot; 2] = [BotSlot::A, BotSlot::B];

    pub fn label(self) -> &'static str {
        match self {
            BotSlot::A => "Bot A",
            BotSlot::B => "Bot B",
        }
    }

    pub fn sender(self) -> Sender {
        match self {
            BotSlot::A => Sender::BotA,
            BotSlot::B => Sender::BotB,
        }
    }
}

impl fmt::Display for BotSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sender {
    User,
    #[serde(rename = "Bot A")]
    BotA,
    #[serde(rename = "Bot B")]
    BotB,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "User",
            Sender::BotA => "Bot A",
            Sender::BotB => "Bot B",
        }
    }

    pub fn slot(self) -> Option<BotSlot> {
        match self {
            Sender::User => None,
            Sender::BotA => Some(BotSlot::A),
            Sender::BotB => Some(BotSlot::B),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Up,
    Down,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Stable identity; transcripts written before ids existed get a fresh one on load
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    /// Model that produced a bot reply. Absent on user messages and failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            sender: Sender::User,
            rating: None,
            model_id: None,
        }
    }

    pub fn reply(slot: BotSlot, text: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            sender: slot.sender(),
            rating: None,
            model_id: Some(model_id.into()),
        }
    }

    pub fn failure(slot: BotSlot) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: FAILURE_SENTINEL.to_string(),
            sender: slot.sender(),
            rating: None,
            model_id: None,
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn is_failure(&self) -> bool {
        !self.is_user() && self.model_id.is_none() && self.text == FAILURE_SENTINEL
    }
}
