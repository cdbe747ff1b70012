use anyhow::{anyhow, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::paths::PathManager;

/// Durable string-keyed JSON storage, one file per key.
///
/// Reads are forgiving: a missing or malformed file behaves like an absent
/// key (the corrupt file is logged and dropped), so stored data can never
/// take the application down. Writes replace the whole value synchronously.
#[derive(Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    pub fn new(path_manager: &PathManager) -> Result<Self> {
        Self::open(path_manager.store_dir())
    }

    pub fn open(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys are derived from identities, which may contain characters
        // unfit for a filename.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.key_path(key).exists()
    }

    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let path = self.key_path(key);

        if !path.exists() {
            debug!("Store miss: {} (file does not exist)", key);
            return None;
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<T>(&content) {
                Ok(value) => {
                    debug!("Store hit: {}", key);
                    Some(value)
                }
                Err(e) => {
                    warn!(
                        "Corrupt stored data for key {}: {}. Deleting corrupt file.",
                        key, e
                    );
                    if let Err(rm_err) = std::fs::remove_file(&path) {
                        warn!("Failed to delete corrupt store file: {}", rm_err);
                    }
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read store file for key {}: {}", key, e);
                None
            }
        }
    }

    pub fn put<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let path = self.key_path(key);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(value)
            .map_err(|e| anyhow!("Failed to serialize value for key {}: {}", key, e))?;
        std::fs::write(&path, json)
            .map_err(|e| anyhow!("Failed to write store file for key {}: {}", key, e))?;
        debug!("Store saved: {}", key);
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
            debug!("Store deleted: {}", key);
        }
        Ok(())
    }

    /// Stored keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let name = e.file_name().into_string().ok()?;
                name.strip_suffix(".json").map(|s| s.to_string())
            })
            .collect()
    }

    /// Remove every stored key. Used by `reelist clear`.
    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            std::fs::remove_dir_all(&self.dir)?;
            std::fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}
