use crate::error::StoreError;
use std::future::Future;

/// The minimal key-value surface the sync engine needs from a store.
///
/// Keys are UTF-8 strings, values are opaque bytes. Every call is a single linearizable request;
/// implementations do not retry. Transport failures surface as [`StoreError::Unavailable`].
pub trait KvClient: Send + Sync {
    /// Creates or overwrites `key`.
    fn put(&self, key: &str, value: &[u8]) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Reads `key`, `None` when absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send;

    /// Removes `key`. Deleting a missing key succeeds.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Every pair whose key starts with `prefix`, ascending by key.
    fn list_by_prefix(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<(String, Vec<u8>)>, StoreError>> + Send;

    /// Releases the connection. Further use of the client is impossible.
    fn close(self) -> impl Future<Output = ()> + Send
    where
        Self: Sized;
}
