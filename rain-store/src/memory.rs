use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use async_trait::async_trait;
use rain_core::store::{KeyValueBackend, StorageError};

/// Process-local key-value storage. Contents are lost when it is dropped.
#[derive(Default)]
pub struct MemoryBackend {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with `entries`.
    pub fn with_entries(entries: HashMap<String, String>) -> Self {
        Self {
            data: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .data
            .read()
            .map_err(|_| StorageError::Read("lock poisoned".into()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| StorageError::Write("lock poisoned".into()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| StorageError::Write("lock poisoned".into()))?;
        guard.remove(key);
        Ok(())
    }
}

impl fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.data.read().map(|g| g.len()).unwrap_or(0);
        f.debug_struct("MemoryBackend")
            .field("entries", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let backend = MemoryBackend::new();

        assert_eq!(backend.get("absent").await, Ok(None));
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let backend = MemoryBackend::new();

        backend.set("k", "one").await.unwrap();
        backend.set("k", "two").await.unwrap();

        assert_eq!(backend.get("k").await, Ok(Some("two".to_string())));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let backend = MemoryBackend::with_entries(HashMap::from([(
            "k".to_string(),
            "v".to_string(),
        )]));

        backend.remove("k").await.unwrap();
        backend.remove("k").await.unwrap();

        assert_eq!(backend.get("k").await, Ok(None));
    }

    #[test]
    fn debug_shows_entry_count() {
        let backend = MemoryBackend::with_entries(HashMap::from([(
            "k".to_string(),
            "v".to_string(),
        )]));

        assert_eq!(format!("{backend:?}"), "MemoryBackend { entries: 1 }");
    }
}
