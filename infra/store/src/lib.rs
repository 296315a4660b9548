//! # Store
//!
//! Environment-scoped access to a strongly-consistent key-value store.
//!
//! Configs live under keys of the form `"<environment>/<name>"`. The crate follows a layered
//! approach:
//! 1. **[`KvClient`]**: the raw key-value surface, implemented for etcd v3 ([`EtcdClient`]) and
//!    in memory ([`MemoryClient`]).
//! 2. **[`NamespacedStore`]**: a view pinned to one [`Environment`].
//! 3. **[`Store`]**: a type-safe builder for etcd connections.
//!
//! ```rust
//! use cfgsync_store::{ConfigName, Environment, MemoryClient, NamespacedStore, StoreError};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), StoreError> {
//! let store = NamespacedStore::new(MemoryClient::new(), Environment::try_from("prod")?);
//! let name = ConfigName::try_from("db.yaml")?;
//!
//! store.set(&name, b"host: db").await?;
//! assert_eq!(store.get(&name).await?, b"host: db");
//! assert_eq!(store.key(&name), "prod/db.yaml");
//! # Ok(())
//! # }
//! ```

mod builder;
mod client;
mod error;
mod etcd;
mod memory;
mod names;
mod namespace;

pub use builder::{DEFAULT_DIAL_TIMEOUT, EtcdBuilder, NoEndpoints, Store, WithEndpoints};
pub use client::KvClient;
pub use error::{StoreError, StoreErrorExt};
pub use etcd::EtcdClient;
pub use memory::MemoryClient;
pub use names::{ConfigName, Environment, KEY_SEPARATOR, MAX_NAME_LEN, RESERVED_PREFIX};
pub use namespace::{ConfigSet, NamespacedStore};
