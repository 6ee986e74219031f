//! In-memory key-value storage.

use std::collections::HashMap;

use async_trait::async_trait;
use booky_application::ports::{KeyValueStorage, StorageError};
use tokio::sync::Mutex;

/// Storage that forgets everything when dropped.
///
/// Used when no storage directory can be determined.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryKeyValueStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_roundtrip_and_remove() {
        let storage = MemoryKeyValueStorage::new();
        storage.set_item("token", "t").await.unwrap();
        assert_eq!(storage.get_item("token").await.unwrap().as_deref(), Some("t"));
        storage.remove_item("token").await.unwrap();
        assert_eq!(storage.get_item("token").await.unwrap(), None);
    }
}
