use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use log::warn;
use serde::{Deserialize, Serialize};

/// Lifetime of a stored entry, matching the backend session window (~2h24min).
pub const ENTRY_TTL_MS: i64 = 8_640_000;

#[derive(Debug, Deserialize, Serialize)]
struct StoredItem {
    value: String,
    expiry: i64,
}

/// File-backed key/value store with expiring entries. Reads may evict:
/// fetching an entry past its expiry deletes it and returns nothing.
#[derive(Clone, Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde("~/.wallet-tracker/session.json").into_owned())
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.load();
        items.insert(
            key.to_string(),
            StoredItem {
                value: value.to_string(),
                expiry: Utc::now().timestamp_millis() + ENTRY_TTL_MS,
            },
        );
        self.save(&items)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let mut items = self.load();
        let item = items.get(key)?;
        if Utc::now().timestamp_millis() > item.expiry {
            items.remove(key);
            if let Err(err) = self.save(&items) {
                warn!("Failed to evict expired entry '{}': {}", key, err);
            }
            return None;
        }
        Some(item.value.clone())
    }

    pub fn remove(&self, key: &str) {
        let mut items = self.load();
        if items.remove(key).is_some() {
            if let Err(err) = self.save(&items) {
                warn!("Failed to remove entry '{}': {}", key, err);
            }
        }
    }

    fn load(&self) -> HashMap<String, StoredItem> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        match serde_json::from_str(&contents) {
            Ok(items) => items,
            Err(err) => {
                // Corrupt store, drop it instead of failing the caller
                warn!("Discarding unreadable session store: {}", err);
                let _ = fs::remove_file(&self.path);
                HashMap::new()
            }
        }
    }

    fn save(&self, items: &HashMap<String, StoredItem>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string(items)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}
