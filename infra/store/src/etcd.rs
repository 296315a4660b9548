use crate::client::KvClient;
use crate::error::StoreError;
use etcd_client::GetOptions;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// A connected etcd v3 client.
///
/// Cloning is cheap: clones share the underlying gRPC channel. Built with [`crate::Store::etcd`].
#[derive(Clone)]
pub struct EtcdClient {
    kv: etcd_client::KvClient,
    endpoints: Arc<[String]>,
}

impl EtcdClient {
    pub(crate) fn new(kv: etcd_client::KvClient, endpoints: Vec<String>) -> Self {
        Self { kv, endpoints: endpoints.into() }
    }

    /// The endpoints this client was dialed with.
    #[must_use]
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }
}

impl fmt::Debug for EtcdClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EtcdClient").field("endpoints", &self.endpoints).finish_non_exhaustive()
    }
}

impl KvClient for EtcdClient {
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut kv = self.kv.clone();
        kv.put(key, value, None).await.map_err(|e| StoreError::unavailable(e, format!("put {key}")))?;
        trace!(key, bytes = value.len(), "Put");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut kv = self.kv.clone();
        let resp =
            kv.get(key, None).await.map_err(|e| StoreError::unavailable(e, format!("get {key}")))?;
        trace!(key, found = !resp.kvs().is_empty(), "Get");
        Ok(resp.kvs().first().map(|pair| pair.value().to_vec()))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut kv = self.kv.clone();
        let resp = kv
            .delete(key, None)
            .await
            .map_err(|e| StoreError::unavailable(e, format!("delete {key}")))?;
        trace!(key, deleted = resp.deleted(), "Delete");
        Ok(())
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        let mut kv = self.kv.clone();
        let resp = kv
            .get(prefix, Some(GetOptions::new().with_prefix()))
            .await
            .map_err(|e| StoreError::unavailable(e, format!("list {prefix}")))?;

        let pairs = decode_pairs(resp.kvs().iter().map(|pair| (pair.key(), pair.value())));

        debug!(prefix, count = pairs.len(), "Listed keys");
        Ok(pairs)
    }

    async fn close(self) {
        debug!(endpoints = ?self.endpoints, "Closing etcd client");
    }
}

/// Keeps the pairs whose key is valid UTF-8, sorted by key.
///
/// A key this tool cannot name exactly is left out rather than renamed, so no dump or restore
/// ever writes it back under a different key.
fn decode_pairs<'a>(raw: impl Iterator<Item = (&'a [u8], &'a [u8])>) -> Vec<(String, Vec<u8>)> {
    let mut pairs: Vec<(String, Vec<u8>)> = raw
        .filter_map(|(key, value)| match String::from_utf8(key.to_vec()) {
            Ok(key) => Some((key, value.to_vec())),
            Err(_) => {
                warn!(key = %key.escape_ascii(), "Skipping key that is not valid UTF-8");
                None
            },
        })
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
}
