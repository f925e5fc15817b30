use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Opaque asynchronous string-keyed blob store the session collections
/// live in. Implementations own their storage lifecycle; callers never
/// acquire or release anything.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the blob under `key`, `None` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous blob.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove every key in `keys`. Missing keys are not an error.
    async fn remove_many(&self, keys: &[&str]) -> Result<()>;
}

/// In-memory store for tests and ephemeral use.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self.inner.lock().expect("blob store lock poisoned");
        Ok(data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.inner.lock().expect("blob store lock poisoned");
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut data = self.inner.lock().expect("blob store lock poisoned");
        for key in keys {
            data.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryBlobStore::new();
        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_remove_many_tolerates_missing() {
        let store = MemoryBlobStore::new();
        store.set("a", "1").await.unwrap();
        store.remove_many(&["a", "never-written"]).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);
    }
}
