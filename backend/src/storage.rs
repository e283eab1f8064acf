//! Flat-file persistence for the inventory
//!
//! The whole collection lives in one pretty-printed JSON array. Saves write a
//! sibling temporary file and rename it over the target, so readers never
//! observe a half-written file. Mutations run their load-modify-save cycle
//! under a single async lock.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use shared::models::Medication;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt inventory file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// JSON file holding the full medication collection
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole collection. A missing file is created empty.
    pub async fn load(&self) -> Result<Vec<Medication>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                if self.create_empty().await? {
                    return Ok(Vec::new());
                }
                tokio::fs::read_to_string(&self.path).await?
            }
            Err(err) => return Err(err.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Replace the persisted collection atomically. Each call writes its own
    /// temporary file, so concurrent saves never rename each other's data.
    pub async fn save(&self, records: &[Medication]) -> Result<(), StorageError> {
        self.ensure_parent().await?;

        let json = serde_json::to_vec_pretty(records)?;
        let tmp = self.temp_path();
        let written = match tokio::fs::write(&tmp, json).await {
            Ok(()) => tokio::fs::rename(&tmp, &self.path).await,
            Err(err) => Err(err),
        };
        if let Err(err) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }

        tracing::debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Load, mutate and save under the write lock. Nothing is written when
    /// `mutate` fails.
    pub async fn modify<T, E, F>(&self, mutate: F) -> Result<T, E>
    where
        F: FnOnce(&mut Vec<Medication>) -> Result<T, E>,
        E: From<StorageError>,
    {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        let output = mutate(&mut records)?;
        self.save(&records).await?;
        Ok(output)
    }

    /// Write `[]` unless the file already exists. Returns whether this call
    /// created it; an existing file is never truncated.
    async fn create_empty(&self) -> Result<bool, StorageError> {
        self.ensure_parent().await?;

        let opened = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await;
        match opened {
            Ok(mut file) => {
                file.write_all(b"[]\n").await?;
                file.flush().await?;
                tracing::info!("Inventory file {} not found, created it", self.path.display());
                Ok(true)
            }
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn ensure_parent(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Unique sibling path, e.g. `inventario.json.<uuid>.tmp`
    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        PathBuf::from(name)
    }
}
