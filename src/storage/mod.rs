// src/storage/mod.rs

//! Session hand-off channel between the application form and its
//! confirmation view.
//!
//! A value is written once, read at most once, and discarded when older
//! than the configured TTL. Absence is always a valid answer.
//!
//! ## Directory Structure (file-backed store)
//!
//! ```text
//! {data_dir}/session/
//! └── israelTourApplication.json   # {"stored_at": ..., "value": "..."}
//! ```

pub mod local;

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ApplicationSummary;

// Re-export for convenience
pub use local::LocalStore;

/// Key under which the pilgrimage summary is handed off.
pub const APPLICATION_KEY: &str = "israelTourApplication";

/// One stored value with its write time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionEntry {
    pub stored_at: DateTime<Utc>,
    pub value: String,
}

impl SessionEntry {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            stored_at: Utc::now(),
            value: value.into(),
        }
    }

    /// Whether the entry is older than `ttl` at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now - self.stored_at > ttl,
            Err(_) => false,
        }
    }
}

/// Short-lived, single-read key-value channel.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Remove and return the value under `key`.
    ///
    /// Returns `None` when nothing is stored or the entry expired.
    async fn take(&self, key: &str) -> Result<Option<String>>;
}

/// Keys become file names, so keep them to a safe alphabet.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::validation(format!("invalid session key '{key}'")))
    }
}

/// Process-local store.
pub struct MemoryStore {
    entries: Mutex<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl MemoryStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, SessionEntry>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::config("session store lock poisoned"))
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        self.lock()?.insert(key.to_string(), SessionEntry::new(value));
        Ok(())
    }

    async fn take(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        let entry = self.lock()?.remove(key);
        Ok(entry
            .filter(|e| !e.is_expired(Utc::now(), self.ttl))
            .map(|e| e.value))
    }
}

/// Typed access to the pilgrimage confirmation hand-off.
pub struct ConfirmationHandoff<'a> {
    store: &'a dyn SessionStore,
}

impl<'a> ConfirmationHandoff<'a> {
    pub fn new(store: &'a dyn SessionStore) -> Self {
        Self { store }
    }

    pub async fn write(&self, summary: &ApplicationSummary) -> Result<()> {
        let json = serde_json::to_string(summary)?;
        self.store.put(APPLICATION_KEY, &json).await
    }

    /// Consume the hand-off.
    ///
    /// Absent, expired or malformed data yields an empty summary; the
    /// confirmation view must render either way.
    pub async fn read(&self) -> ApplicationSummary {
        let raw = match self.store.take(APPLICATION_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return ApplicationSummary::default(),
            Err(e) => {
                log::warn!("Failed to read application hand-off: {}", e);
                return ApplicationSummary::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Discarding malformed application hand-off: {}", e);
            ApplicationSummary::default()
        })
    }
}
