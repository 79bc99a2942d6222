//! Persistence adapter for the last harvest result.
//!
//! Wraps a [`KeyValueBackend`] slot and converts between JSON text and
//! [`SavedHarvest`]. Reads are tolerant: an empty slot, an unreadable
//! backend and a corrupt record all mean "no prior result".

use tracing::{debug, warn};

use super::backend::{KeyValueBackend, StorageError};
use crate::models::SavedHarvest;

/// Slot name kept from the calculator page so stored results stay readable.
pub const STORAGE_KEY: &str = "resultadoAgua2025";

pub struct ResultStore {
    backend: Box<dyn KeyValueBackend>,
    key: String,
}

impl ResultStore {
    /// Creates an adapter over `backend` using [`STORAGE_KEY`].
    pub fn new(backend: Box<dyn KeyValueBackend>) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(
        backend: Box<dyn KeyValueBackend>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Loads the stored record, or `None` when there is nothing usable.
    pub async fn load(&self) -> Option<SavedHarvest> {
        let raw = match self.backend.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored result");
                return None;
            }
            Err(error) => {
                warn!(key = %self.key, %error, "could not read stored result");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(saved) => Some(saved),
            Err(error) => {
                warn!(key = %self.key, %error, "ignoring corrupt stored result");
                None
            }
        }
    }

    /// Replaces the stored record.
    pub async fn save(&self, saved: &SavedHarvest) -> Result<(), StorageError> {
        let json = serde_json::to_string(saved)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.backend.set(&self.key, &json).await?;
        debug!(key = %self.key, backend = self.backend.name(), "stored result");
        Ok(())
    }

    /// Empties the slot. Failures are logged and otherwise ignored.
    pub async fn clear(&self) {
        if let Err(error) = self.backend.remove(&self.key).await {
            warn!(key = %self.key, %error, "could not clear stored result");
        }
    }
}
