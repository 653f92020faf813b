use gloo_storage::{LocalStorage, Storage};
use shared::storage::{ConversationStore, KeyValueStore, StorageError, StorageResult};

/// `window.localStorage`, holding raw strings so the key layout stays readable
/// from devtools.
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }

    fn keys(&self) -> Vec<String> {
        let raw = LocalStorage::raw();
        let len = raw.length().unwrap_or(0);
        (0..len).filter_map(|i| raw.key(i).ok().flatten()).collect()
    }
}

pub fn conversations() -> ConversationStore<BrowserStorage> {
    ConversationStore::new(BrowserStorage)
}
