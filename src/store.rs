//! The product store: one logical key holding the whole catalog as one JSON
//! value, last write wins.
//!
//! Exactly one backend is used per deployment, chosen by `STOREFRONT_STORE`.
//! See `upstash` for the hosted Redis backend.

use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Read the stored value. `None` when the key has never been written.
    async fn get(&self) -> Result<Option<Value>, StoreError>;

    /// Overwrite the stored value.
    async fn set(&self, value: &Value) -> Result<(), StoreError>;

    fn backend(&self) -> &'static str;
}

// ============================================================================
// Sled Backend
// ============================================================================

const PRODUCTS_TREE: &str = "products";

pub struct SledStore {
    tree: sled::Tree,
    key: String,
}

impl SledStore {
    pub fn open(db: &sled::Db, key: impl Into<String>) -> Result<Self, StoreError> {
        Ok(Self {
            tree: db.open_tree(PRODUCTS_TREE)?,
            key: key.into(),
        })
    }
}

#[async_trait]
impl ProductStore for SledStore {
    async fn get(&self) -> Result<Option<Value>, StoreError> {
        match self.tree.get(self.key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, value: &Value) -> Result<(), StoreError> {
        let json = serde_json::to_vec(value)?;
        self.tree.insert(self.key.as_bytes(), json)?;
        self.tree.flush_async().await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sled"
    }
}

// ============================================================================
// Memory Backend
// ============================================================================

/// In-process store. Counts writes and can be switched into failure mode,
/// which makes it the usual stand-in for a remote store in tests.
#[derive(Default)]
pub struct MemoryStore {
    value: Mutex<Option<Value>>,
    writes: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: Value) -> Self {
        let store = Self::default();
        *store.value.lock().unwrap_or_else(|e| e.into_inner()) = Some(value);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Option<Value> {
        self.value.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn get(&self) -> Result<Option<Value>, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        Ok(self.snapshot())
    }

    async fn set(&self, value: &Value) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = Some(value.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_sled_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let db = sled::open(dir.path().join("db")).unwrap();
        let store = SledStore::open(&db, "storefront_products").unwrap();

        assert_eq!(store.get().await.unwrap(), None);

        let value = json!([{"id": 1, "name": "Phone Stand", "price": 8.0}]);
        store.set(&value).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn test_sled_store_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let db = sled::open(dir.path().join("db")).unwrap();
        let a = SledStore::open(&db, "a").unwrap();
        let b = SledStore::open(&db, "b").unwrap();

        a.set(&json!([1])).await.unwrap();
        assert_eq!(b.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_failure_switch() {
        let store = MemoryStore::new();
        store.set(&json!([])).await.unwrap();
        assert_eq!(store.writes(), 1);

        store.set_failing(true);
        assert!(store.get().await.is_err());
        assert!(store.set(&json!([1])).await.is_err());
        assert_eq!(store.writes(), 1);

        store.set_failing(false);
        assert_eq!(store.get().await.unwrap(), Some(json!([])));
    }
}
