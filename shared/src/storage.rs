//! Key-value persistence for credentials, the summary index and transcripts.
//!
//! Key layout:
//! - `openai_api_key`, `openai_url`: raw strings
//! - `savedChats`: JSON array of [`ConversationSummary`]
//! - `chat-<id>`: JSON [`Conversation`]

use crate::models::{Conversation, ConversationSummary, Credentials, DEFAULT_BASE_URL};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::HashSet;
use thiserror::Error;

pub const API_KEY_KEY: &str = "openai_api_key";
pub const BASE_URL_KEY: &str = "openai_url";
pub const INDEX_KEY: &str = "savedChats";
pub const TRANSCRIPT_PREFIX: &str = "chat-";

pub fn transcript_key(id: &str) -> String {
    format!("{TRANSCRIPT_PREFIX}{id}")
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage write failed for {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Conversation not found: {0}")]
    NotFound(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Synchronous string store, e.g. browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str);
    fn keys(&self) -> Vec<String>;
}

/// In-process store, used natively and in tests.
#[derive(Default, Debug)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

pub struct ConversationStore<S> {
    kv: S,
}

impl<S: KeyValueStore> ConversationStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn backend(&self) -> &S {
        &self.kv
    }

    pub fn credentials(&self) -> Credentials {
        let base_url = self
            .kv
            .get(BASE_URL_KEY)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Credentials {
            api_key: self.kv.get(API_KEY_KEY).unwrap_or_default(),
            base_url,
        }
    }

    pub fn save_credentials(&self, credentials: &Credentials) -> StorageResult<()> {
        self.kv.set(API_KEY_KEY, &credentials.api_key)?;
        self.kv.set(BASE_URL_KEY, &credentials.base_url)
    }

    /// The summary index as stored. Unreadable data counts as empty.
    pub fn summaries(&self) -> Vec<ConversationSummary> {
        let Some(raw) = self.kv.get(INDEX_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable conversation index: {}", e);
            Vec::new()
        })
    }

    /// List conversations after bringing the index in line with the stored transcripts.
    pub fn list(&self) -> Vec<ConversationSummary> {
        match self.reconcile() {
            Ok(summaries) => summaries,
            Err(e) => {
                tracing::warn!("Failed to persist reconciled index: {}", e);
                self.summaries()
            }
        }
    }

    /// Drop index entries whose transcript is missing or unreadable and
    /// re-index transcripts that have no entry. Writes the index only when it changed.
    pub fn reconcile(&self) -> StorageResult<Vec<ConversationSummary>> {
        let index = self.summaries();
        let mut seen = HashSet::new();
        let mut repaired = Vec::with_capacity(index.len());

        for summary in &index {
            if !seen.insert(summary.id.clone()) {
                tracing::warn!("Dropping duplicate index entry {}", summary.id);
                continue;
            }
            if self.load(&summary.id).is_some() {
                repaired.push(summary.clone());
            } else {
                tracing::warn!("Dropping index entry {} without transcript", summary.id);
            }
        }

        for key in self.kv.keys() {
            let Some(id) = key.strip_prefix(TRANSCRIPT_PREFIX) else {
                continue;
            };
            if seen.contains(id) {
                continue;
            }
            if let Some(conversation) = self.load(id) {
                tracing::warn!("Re-indexing orphan transcript {}", id);
                seen.insert(id.to_string());
                repaired.push(conversation.summary());
            }
        }

        if repaired != index {
            self.write_index(&repaired)?;
        }
        Ok(repaired)
    }

    pub fn load(&self, id: &str) -> Option<Conversation> {
        let raw = self.kv.get(&transcript_key(id))?;
        match serde_json::from_str::<Conversation>(&raw) {
            Ok(mut conversation) => {
                conversation.normalize_loaded(id);
                Some(conversation)
            }
            Err(e) => {
                tracing::warn!("Unreadable transcript {}: {}", id, e);
                None
            }
        }
    }

    /// Write the transcript and make sure the index carries a matching entry.
    pub fn save(&self, conversation: &Conversation) -> StorageResult<()> {
        let body = serde_json::to_string(conversation)?;
        self.kv.set(&transcript_key(&conversation.id), &body)?;

        let mut index = self.summaries();
        let summary = conversation.summary();
        match index.iter_mut().find(|s| s.id == summary.id) {
            Some(existing) if existing.name == summary.name => return Ok(()),
            Some(existing) => existing.name = summary.name,
            None => index.push(summary),
        }
        self.write_index(&index)
    }

    pub fn rename(&self, id: &str, name: &str) -> StorageResult<Conversation> {
        let mut conversation = self
            .load(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        conversation.name = name.to_string();
        self.save(&conversation)?;
        Ok(conversation)
    }

    /// Remove both the transcript and its index entry.
    pub fn delete(&self, id: &str) -> StorageResult<()> {
        self.kv.remove(&transcript_key(id));
        let index = self.summaries();
        let remaining: Vec<_> = index.iter().filter(|s| s.id != id).cloned().collect();
        if remaining.len() != index.len() {
            self.write_index(&remaining)?;
        }
        Ok(())
    }

    fn write_index(&self, index: &[ConversationSummary]) -> StorageResult<()> {
        let body = serde_json::to_string(index)?;
        self.kv.set(INDEX_KEY, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BotSlot, GenerationSettings, Message, Rating};
    use chrono::{TimeZone, Utc};

    fn store() -> ConversationStore<MemoryStore> {
        ConversationStore::new(MemoryStore::default())
    }

    fn saved(store: &ConversationStore<MemoryStore>, millis: i64, name: &str) -> Conversation {
        let now = Utc.timestamp_millis_opt(millis).unwrap();
        let mut conversation = Conversation::draft(now);
        conversation.name = name.to_string();
        conversation.stamp(now);
        store.save(&conversation).unwrap();
        conversation
    }

    #[test]
    fn credentials_default_when_absent() {
        let store = store();
        let credentials = store.credentials();
        assert_eq!(credentials.api_key, "");
        assert_eq!(credentials.base_url, DEFAULT_BASE_URL);

        let updated = Credentials {
            api_key: "sk-test".to_string(),
            base_url: "http://localhost:9000/v1".to_string(),
        };
        store.save_credentials(&updated).unwrap();
        assert_eq!(store.credentials(), updated);
        assert_eq!(store.backend().get(API_KEY_KEY).as_deref(), Some("sk-test"));
    }

    #[test]
    fn settings_round_trip_through_storage() {
        let store = store();
        let mut conversation = saved(&store, 1_000, "tuning");
        conversation.set_settings(
            BotSlot::A,
            GenerationSettings {
                temperature: 0.3,
                top_k: 12,
                top_p: 0.4,
                model_id: "gpt-4o-mini".to_string(),
            },
        );
        conversation.set_settings(
            BotSlot::B,
            GenerationSettings {
                temperature: 1.0,
                top_k: 100,
                top_p: 1.0,
                model_id: "llama3".to_string(),
            },
        );
        store.save(&conversation).unwrap();

        let loaded = store.load(&conversation.id).unwrap();
        assert_eq!(loaded.bot_a_settings, conversation.bot_a_settings);
        assert_eq!(loaded.bot_b_settings, conversation.bot_b_settings);
    }

    #[test]
    fn ratings_and_ids_survive_reload() {
        let store = store();
        let mut conversation = saved(&store, 2_000, "ratings");
        let reply = Message::reply(BotSlot::B, "answer", "gpt-4");
        let reply_id = reply.id;
        conversation.messages.push(Message::user("question"));
        conversation.messages.push(reply);
        conversation.rate(reply_id, Rating::Up);
        store.save(&conversation).unwrap();

        let loaded = store.load(&conversation.id).unwrap();
        assert_eq!(loaded.messages, conversation.messages);
    }

    #[test]
    fn delete_removes_transcript_and_index_entry() {
        let store = store();
        let first = saved(&store, 3_000, "first");
        let second = saved(&store, 4_000, "second");

        store.delete(&first.id).unwrap();

        assert!(store.backend().get(&transcript_key(&first.id)).is_none());
        let ids: Vec<_> = store.list().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second.id]);
    }

    #[test]
    fn rename_updates_index_and_transcript() {
        let store = store();
        let conversation = saved(&store, 5_000, "before");

        store.rename(&conversation.id, "after").unwrap();

        assert_eq!(store.load(&conversation.id).unwrap().name, "after");
        assert_eq!(store.list()[0].name, "after");
        assert!(matches!(
            store.rename("missing", "x"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn saving_twice_keeps_a_single_index_entry() {
        let store = store();
        let mut conversation = saved(&store, 6_000, "once");
        conversation.messages.push(Message::user("more"));
        store.save(&conversation).unwrap();

        assert_eq!(store.summaries().len(), 1);
    }

    #[test]
    fn reconcile_drops_dangling_and_reindexes_orphans() {
        let store = store();
        let kept = saved(&store, 7_000, "kept");
        let dangling = saved(&store, 8_000, "dangling");
        store.backend().remove(&transcript_key(&dangling.id));

        let orphan = {
            let now = Utc.timestamp_millis_opt(9_000).unwrap();
            let mut conversation = Conversation::draft(now);
            conversation.stamp(now);
            conversation
        };
        store
            .backend()
            .set(
                &transcript_key(&orphan.id),
                &serde_json::to_string(&orphan).unwrap(),
            )
            .unwrap();

        let ids: Vec<_> = store.list().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![kept.id, orphan.id]);
        assert_eq!(store.summaries().len(), 2);
    }

    #[test]
    fn unreadable_index_reads_as_empty() {
        let store = store();
        store.backend().set(INDEX_KEY, "{not json").unwrap();
        assert!(store.summaries().is_empty());
        assert!(store.list().is_empty());
    }
}
