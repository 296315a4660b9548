use crate::client::KvClient;
use crate::error::StoreError;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

#[derive(Debug, Default)]
struct MemoryInner {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    offline: AtomicBool,
}

/// An in-process store with the same semantics as the etcd client.
///
/// Clones share state, so a test can keep a handle for inspection after handing one to the
/// engine. [`MemoryClient::set_offline`] makes every call fail with [`StoreError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct MemoryClient {
    inner: Arc<MemoryInner>,
}

impl MemoryClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, e.g. `MemoryClient::with_entries([("prod/db.yaml", "a: 1")])`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let client = Self::new();
        client.inner.entries.write().extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        client
    }

    /// Simulates a lost connection (or its recovery).
    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    /// A copy of every stored pair.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.inner.entries.read().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().is_empty()
    }

    fn ensure_online(&self, op: &'static str) -> Result<(), StoreError> {
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                message: "memory store is offline".into(),
                context: Some(op.into()),
            });
        }
        Ok(())
    }
}

impl KvClient for MemoryClient {
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.ensure_online("put")?;
        self.inner.entries.write().insert(key.to_owned(), value.to_vec());
        trace!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.ensure_online("get")?;
        Ok(self.inner.entries.read().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.ensure_online("delete")?;
        self.inner.entries.write().remove(key);
        Ok(())
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        self.ensure_online("list")?;
        let entries = self.inner.entries.read();
        Ok(entries
            .range(prefix.to_owned()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    async fn close(self) {
        trace!(entries = self.len(), "Closing memory store");
    }
}
