use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use rain_core::store::{KeyValueBackend, StorageError};
use tokio::fs;
use tracing::debug;

/// Directory used when no location is configured.
pub const DEFAULT_STORE_DIR: &str = ".rain-harvest";

/// Suffix source for temporary files, unique within the process.
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Key-value storage kept as one JSON file per key inside a directory.
///
/// Each write goes to its own temporary sibling and is renamed into place,
/// so a reader never sees a half-written value and concurrent writers to the
/// same key never share a temporary file.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Opens `dir`, creating it when missing.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::Unavailable(format!("cannot create {}: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StorageError::Configuration(format!(
                "key '{key}' is not usable as a file name"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn temp_path(&self, path: &Path) -> PathBuf {
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{}-{seq}.tmp", std::process::id()));
        path.with_file_name(name)
    }
}

#[async_trait]
impl KeyValueBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read(format!("{}: {e}", path.display()))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.key_path(key)?;
        let tmp_path = self.temp_path(&path);

        let written = match fs::write(&tmp_path, value).await {
            Ok(()) => fs::rename(&tmp_path, &path)
                .await
                .map_err(|e| StorageError::Write(format!("{}: {e}", path.display()))),
            Err(e) => Err(StorageError::Write(format!("{}: {e}", tmp_path.display()))),
        };
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path).await {
                debug!(path = %tmp_path.display(), error = %cleanup, "temporary file not removed");
            }
            return Err(e);
        }

        debug!(path = %path.display(), bytes = value.len(), "wrote stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Write(format!("{}: {e}", path.display()))),
        }
    }
}

impl fmt::Debug for FileBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileBackend")
            .field("dir", &self.dir)
            .finish()
    }
}
