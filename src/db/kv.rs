// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value store handle with typed JSON helpers.
//!
//! Provides:
//! - Raw string get/set/remove (the on-device storage contract)
//! - JSON (de)serialization of whole collections
//! - Per-key locks for read-modify-write sequences

use crate::error::{Result, StoreError};
use anyhow::Context;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// File suffix for stored values.
const VALUE_SUFFIX: &str = "kv";
/// File suffix for writes in progress.
const TEMP_SUFFIX: &str = "tmp";

/// Per-key locks, shared by every clone of a store.
type KeyLocks = Arc<DashMap<String, Arc<Mutex<()>>>>;

#[derive(Clone)]
enum Backend {
    Memory(Arc<DashMap<String, String>>),
    Directory(Arc<PathBuf>),
    Offline,
}

/// Process-wide key-value store.
#[derive(Clone)]
pub struct KvStore {
    backend: Backend,
    locks: KeyLocks,
}

impl KvStore {
    /// Create an empty store held in memory.
    pub fn new_in_memory() -> Self {
        Self::with_backend(Backend::Memory(Arc::new(DashMap::new())))
    }

    /// Open (creating if needed) a store backed by one file per key in `dir`.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("failed to create store directory {}", dir.display()))?;

        tracing::info!(path = %dir.display(), "Opened key-value store");

        Ok(Self::with_backend(Backend::Directory(Arc::new(dir))))
    }

    /// Create a mock store for testing (offline mode).
    ///
    /// All operations return a storage error.
    pub fn new_mock() -> Self {
        Self::with_backend(Backend::Offline)
    }

    fn with_backend(backend: Backend) -> Self {
        Self {
            backend,
            locks: Arc::new(DashMap::new()),
        }
    }

    // ─── Raw Operations ──────────────────────────────────────────

    /// Read the value stored under `key`, `None` if absent.
    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        match &self.backend {
            Backend::Memory(map) => Ok(map.get(key).map(|v| v.value().clone())),
            Backend::Directory(dir) => {
                let path = value_path(dir, key);
                match tokio::fs::read_to_string(&path).await {
                    Ok(value) => Ok(Some(value)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(StoreError::Storage(format!(
                        "failed to read {}: {}",
                        path.display(),
                        e
                    ))),
                }
            }
            Backend::Offline => Err(offline()),
        }
    }

    /// Overwrite the value stored under `key`.
    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        match &self.backend {
            Backend::Memory(map) => {
                map.insert(key.to_string(), value.to_string());
                Ok(())
            }
            Backend::Directory(dir) => write_atomic(dir, key, value)
                .await
                .map_err(|e| StoreError::Storage(format!("{:#}", e))),
            Backend::Offline => Err(offline()),
        }
    }

    /// Remove `key`. Removing an absent key is not an error.
    pub async fn remove_item(&self, key: &str) -> Result<()> {
        match &self.backend {
            Backend::Memory(map) => {
                map.remove(key);
                Ok(())
            }
            Backend::Directory(dir) => {
                let path = value_path(dir, key);
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => Ok(()),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                    Err(e) => Err(StoreError::Storage(format!(
                        "failed to remove {}: {}",
                        path.display(),
                        e
                    ))),
                }
            }
            Backend::Offline => Err(offline()),
        }
    }

    /// Whether a value is stored under `key`.
    pub async fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.get_item(key).await?.is_some())
    }

    // ─── JSON Helpers ────────────────────────────────────────────

    /// Read and deserialize the JSON value under `key`.
    ///
    /// A value that does not parse is reported as [`StoreError::Corrupt`].
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_item(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Corrupt {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Serialize `value` as JSON and store it under `key`.
    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("failed to serialize value for {}", key))?;
        self.set_item(key, &raw).await
    }

    // ─── Locking ─────────────────────────────────────────────────

    /// Acquire the lock for `key`.
    ///
    /// Hold the guard across a read-modify-write of that key. Locks on
    /// different keys are independent.
    pub async fn lock_key(&self, key: &str) -> KeyGuard {
        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        KeyGuard {
            guard: Some(lock.lock_owned().await),
            key: key.to_string(),
            locks: Arc::clone(&self.locks),
        }
    }
}

/// Held lock on one key.
///
/// On drop the table entry is removed unless another caller holds or waits
/// on the same lock, so the table only holds keys in use.
pub struct KeyGuard {
    guard: Option<OwnedMutexGuard<()>>,
    key: String,
    locks: KeyLocks,
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Waiters clone the Arc under the shard lock, so a count of one
        // (the table's own reference) means nobody else can reach it.
        self.locks.remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

fn offline() -> StoreError {
    StoreError::Storage("Store not available (offline mode)".to_string())
}

/// File holding the value for `key`. Keys are url-encoded so any key maps
/// to a single flat file name.
fn value_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.{}", urlencoding::encode(key), VALUE_SUFFIX))
}

/// Write via a temp file and rename so readers never see a partial value.
async fn write_atomic(dir: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let path = value_path(dir, key);
    let temp = dir.join(format!("{}.{}", urlencoding::encode(key), TEMP_SUFFIX));

    tokio::fs::write(&temp, value)
        .await
        .with_context(|| format!("failed to write {}", temp.display()))?;
    tokio::fs::rename(&temp, &path)
        .await
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_path_encodes_key() {
        let path = value_path(Path::new("/data"), "@workout_logs_1700000000000");
        assert_eq!(
            path,
            PathBuf::from("/data/%40workout_logs_1700000000000.kv")
        );
    }

    #[test]
    fn test_value_path_keeps_separators_out() {
        let path = value_path(Path::new("/data"), "../escape");
        assert_eq!(path.parent(), Some(Path::new("/data")));
    }

    #[tokio::test]
    async fn test_memory_round_trip_and_remove() {
        let kv = KvStore::new_in_memory();
        assert_eq!(kv.get_item("active_profile_id").await.unwrap(), None);

        kv.set_item("active_profile_id", "42").await.unwrap();
        assert_eq!(
            kv.get_item("active_profile_id").await.unwrap().as_deref(),
            Some("42")
        );

        kv.remove_item("active_profile_id").await.unwrap();
        kv.remove_item("active_profile_id").await.unwrap();
        assert!(!kv.contains_key("active_profile_id").await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let kv = KvStore::new_in_memory();
        let other = kv.clone();
        kv.set_item("profiles", "[]").await.unwrap();
        assert!(other.contains_key("profiles").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_json_reports_corrupt_value() {
        let kv = KvStore::new_in_memory();
        kv.set_item("profiles", "[{broken").await.unwrap();

        let err = kv.get_json::<Vec<String>>("profiles").await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == "profiles"));
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_operation() {
        let kv = KvStore::new_mock();
        assert!(matches!(
            kv.get_item("profiles").await,
            Err(StoreError::Storage(_))
        ));
        assert!(kv.set_item("profiles", "[]").await.is_err());
        assert!(kv.remove_item("profiles").await.is_err());
    }

    #[tokio::test]
    async fn test_lock_key_serializes_same_key() {
        let kv = KvStore::new_in_memory();
        let guard = kv.lock_key("profiles").await;

        let contender = kv.clone();
        let waiting = tokio::spawn(async move {
            let _guard = contender.lock_key("profiles").await;
        });

        // A different key is not blocked by the held guard.
        let _other = kv.lock_key("@workout_logs_1").await;

        tokio::task::yield_now().await;
        assert!(!waiting.is_finished());

        drop(guard);
        waiting.await.unwrap();
    }

    #[tokio::test]
    async fn test_lock_table_drops_released_keys() {
        let kv = KvStore::new_in_memory();

        let guard = kv.lock_key("@workout_logs_1").await;
        assert!(kv.locks.contains_key("@workout_logs_1"));
        drop(guard);
        assert!(kv.locks.is_empty());

        // An entry with a waiter survives the holder's release.
        let guard = kv.lock_key("profiles").await;
        let contender = kv.clone();
        let waiting = tokio::spawn(async move {
            let _guard = contender.lock_key("profiles").await;
        });
        tokio::task::yield_now().await;

        drop(guard);
        assert!(kv.locks.contains_key("profiles"));
        waiting.await.unwrap();
        assert!(kv.locks.is_empty());
    }
}
