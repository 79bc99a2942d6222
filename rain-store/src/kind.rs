//! Backend selection by configured name.

use std::fmt;
use std::path::PathBuf;

use rain_core::store::{KeyValueBackend, StorageError};
use tracing::debug;

use crate::file::{DEFAULT_STORE_DIR, FileBackend};
use crate::memory::MemoryBackend;

/// The storage backends this crate provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// One JSON file per slot inside a directory; survives restarts.
    File,
    /// Process-local slots, gone when the process exits.
    Memory,
}

impl BackendKind {
    pub fn all() -> &'static [BackendKind] {
        &[BackendKind::File, BackendKind::Memory]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
        }
    }

    /// Parses a configured backend name, ignoring case and surrounding
    /// whitespace.
    pub fn parse(name: &str) -> Result<Self, StorageError> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                let available: Vec<_> = Self::all().iter().map(|k| k.as_str()).collect();
                StorageError::Configuration(format!(
                    "unknown backend '{name}'; available: {}",
                    available.join(", ")
                ))
            })
    }

    /// Directory a file backend would use for `location`. Blank locations
    /// mean [`DEFAULT_STORE_DIR`]; the memory backend has no directory.
    pub fn store_dir(&self, location: &str) -> Option<PathBuf> {
        match self {
            Self::Memory => None,
            Self::File => match location.trim() {
                "" => Some(PathBuf::from(DEFAULT_STORE_DIR)),
                dir => Some(PathBuf::from(dir)),
            },
        }
    }

    /// Opens a backend of this kind at `location`.
    pub async fn open(&self, location: &str) -> Result<Box<dyn KeyValueBackend>, StorageError> {
        debug!(backend = %self, location, "opening storage backend");
        match self.store_dir(location) {
            Some(dir) => Ok(Box::new(FileBackend::open(dir).await?)),
            None => Ok(Box::new(MemoryBackend::new())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
