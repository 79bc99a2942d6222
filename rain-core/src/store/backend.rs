use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Read error: {0}")]
    Read(String),

    #[error("Write error: {0}")]
    Write(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Durable string slots addressed by key, the shape of browser local storage.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Unique, lowercase identifier of the backend kind.
    fn name(&self) -> &'static str;

    /// Returns the value stored under `key`, or `None` when the slot is empty.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Empties the slot. Removing an empty slot is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
