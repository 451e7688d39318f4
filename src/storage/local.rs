// src/storage/local.rs

//! File-backed session store.
//!
//! Lets the `pilgrimage` and `confirmation` commands, which run as separate
//! processes, share the hand-off channel.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{SessionEntry, SessionStore, check_key};

/// Session store keeping one JSON file per key.
#[derive(Clone)]
pub struct LocalStore {
    root_dir: PathBuf,
    ttl: Duration,
}

impl LocalStore {
    /// Create a store rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            root_dir: root_dir.into(),
            ttl,
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(format!("{key}.json"))
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.root_dir).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Read bytes, returning None if the file doesn't exist.
    async fn read_bytes(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn remove(&self, path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl SessionStore for LocalStore {
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        let bytes = serde_json::to_vec_pretty(&SessionEntry::new(value))?;
        self.write_bytes(&self.path(key), &bytes).await?;
        log::debug!("Session entry '{}' written", key);
        Ok(())
    }

    async fn take(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        let path = self.path(key);
        let Some(bytes) = self.read_bytes(&path).await? else {
            return Ok(None);
        };
        self.remove(&path).await?;

        let entry: SessionEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Discarding unreadable session entry '{}': {}", key, e);
                return Ok(None);
            }
        };

        if entry.is_expired(Utc::now(), self.ttl) {
            log::info!("Session entry '{}' expired", key);
            return Ok(None);
        }
        Ok(Some(entry.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> LocalStore {
        LocalStore::new(tmp.path().join("session"), Duration::from_secs(1800))
    }

    #[tokio::test]
    async fn test_put_then_take_once() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        store.put("israelTourApplication", "{}").await.unwrap();
        assert!(store.path("israelTourApplication").exists());

        let value = store.take("israelTourApplication").await.unwrap();
        assert_eq!(value.as_deref(), Some("{}"));
        assert!(!store.path("israelTourApplication").exists());
        assert_eq!(store.take("israelTourApplication").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_take_missing() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(store(&tmp).take("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_discarded() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        let stale = SessionEntry {
            stored_at: Utc::now() - chrono::Duration::hours(2),
            value: "old".into(),
        };
        let bytes = serde_json::to_vec(&stale).unwrap();
        store.write_bytes(&store.path("old"), &bytes).await.unwrap();

        assert_eq!(store.take("old").await.unwrap(), None);
        assert!(!store.path("old").exists());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_discarded() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store.write_bytes(&store.path("bad"), b"garbage").await.unwrap();

        assert_eq!(store.take("bad").await.unwrap(), None);
        assert!(!store.path("bad").exists());
    }
}
