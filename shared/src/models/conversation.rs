use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BotSlot, GenerationSettings, Message, Rating};

/// Entry of the summary index used to list conversations without loading transcripts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// The three records one user turn contributes to a transcript.
#[derive(Clone, Debug, PartialEq)]
pub struct Turn {
    pub user: Message,
    pub bot_a: Message,
    pub bot_b: Message,
}

impl Turn {
    pub fn into_messages(self) -> [Message; 3] {
        [self.user, self.bot_a, self.bot_b]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Filled from the storage key on load; older records did not carry it.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(rename = "botASettings")]
    pub bot_a_settings: GenerationSettings,
    #[serde(rename = "botBSettings")]
    pub bot_b_settings: GenerationSettings,
}

impl Conversation {
    /// A fresh, unsaved conversation with default settings for both slots.
    pub fn draft(now: DateTime<Utc>) -> Self {
        Self {
            id: id_for(now),
            name: String::new(),
            created_at: now,
            messages: Vec::new(),
            bot_a_settings: GenerationSettings::for_slot(BotSlot::A),
            bot_b_settings: GenerationSettings::for_slot(BotSlot::B),
        }
    }

    /// Assign the identity a conversation receives when it is first saved.
    pub fn stamp(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.id = id_for(now);
        let trimmed = self.name.trim();
        self.name = if trimmed.is_empty() {
            default_name(&self.id)
        } else {
            trimmed.to_string()
        };
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }

    pub fn settings(&self, slot: BotSlot) -> &GenerationSettings {
        match slot {
            BotSlot::A => &self.bot_a_settings,
            BotSlot::B => &self.bot_b_settings,
        }
    }

    pub fn set_settings(&mut self, slot: BotSlot, settings: GenerationSettings) {
        let settings = settings.normalized(slot);
        match slot {
            BotSlot::A => self.bot_a_settings = settings,
            BotSlot::B => self.bot_b_settings = settings,
        }
    }

    pub fn append_turn(&mut self, turn: Turn) {
        self.messages.extend(turn.into_messages());
    }

    /// Overwrite the rating of one message. Returns false when no message has that id.
    pub fn rate(&mut self, message_id: Uuid, rating: Rating) -> bool {
        match self.messages.iter_mut().find(|m| m.id == message_id) {
            Some(message) => {
                message.rating = Some(rating);
                true
            }
            None => false,
        }
    }

    pub fn message(&self, message_id: Uuid) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == message_id)
    }

    /// Repair a record read back from storage under `id`.
    pub(crate) fn normalize_loaded(&mut self, id: &str) {
        self.id = id.to_string();
        if self.name.trim().is_empty() {
            self.name = default_name(id);
        }
        self.bot_a_settings = self.bot_a_settings.clone().normalized(BotSlot::A);
        self.bot_b_settings = self.bot_b_settings.clone().normalized(BotSlot::B);
    }
}

/// Conversation ids are the decimal millisecond timestamp of their creation.
pub fn id_for(created_at: DateTime<Utc>) -> String {
    created_at.timestamp_millis().to_string()
}

pub fn default_name(id: &str) -> String {
    format!("Chat {id}")
}
