use crate::client::KvClient;
use crate::error::StoreError;
use crate::names::{ConfigName, Environment};
use std::collections::BTreeMap;
use std::collections::btree_map;
use tracing::{debug, instrument};

/// Every config of one environment, keyed by name with the `"<env>/"` prefix stripped.
///
/// Names are kept as they were found in the store; they are validated only where they have to
/// become file names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSet {
    entries: BTreeMap<String, Vec<u8>>,
}

impl ConfigSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl IntoIterator for ConfigSet {
    type Item = (String, Vec<u8>);
    type IntoIter = btree_map::IntoIter<String, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Vec<u8>)> for ConfigSet {
    fn from_iter<I: IntoIterator<Item = (String, Vec<u8>)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// A store client scoped to one environment.
///
/// Every operation maps a [`ConfigName`] onto `"<env>/<name>"`; listing only ever sees keys
/// under `"<env>/"`, so `prod` never observes `prod2`.
#[derive(Debug)]
pub struct NamespacedStore<C: KvClient> {
    client: C,
    environment: Environment,
}

impl<C: KvClient> NamespacedStore<C> {
    pub const fn new(client: C, environment: Environment) -> Self {
        Self { client, environment }
    }

    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    #[must_use]
    pub fn key(&self, name: &ConfigName) -> String {
        self.environment.key(name)
    }

    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the key is absent, [`StoreError::Unavailable`] on
    /// transport failure.
    pub async fn get(&self, name: &ConfigName) -> Result<Vec<u8>, StoreError> {
        let key = self.key(name);
        self.client.get(&key).await?.ok_or_else(|| StoreError::NotFound {
            message: key.into(),
            context: Some(format!("environment {}", self.environment).into()),
        })
    }

    /// Creates or overwrites the config.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on transport failure.
    pub async fn set(&self, name: &ConfigName, value: &[u8]) -> Result<(), StoreError> {
        self.client.put(&self.key(name), value).await
    }

    /// Removes the config; a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on transport failure.
    pub async fn delete(&self, name: &ConfigName) -> Result<(), StoreError> {
        self.client.delete(&self.key(name)).await
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on transport failure.
    #[instrument(skip(self), fields(env = %self.environment))]
    pub async fn list_all(&self) -> Result<ConfigSet, StoreError> {
        let prefix = self.environment.prefix();
        let pairs = self.client.list_by_prefix(&prefix).await?;

        let set: ConfigSet = pairs
            .into_iter()
            .filter_map(|(key, value)| key.strip_prefix(&prefix).map(|name| (name.to_owned(), value)))
            .collect();

        debug!(count = set.len(), "Listed environment");
        Ok(set)
    }

    pub async fn close(self) {
        self.client.close().await;
    }
}
