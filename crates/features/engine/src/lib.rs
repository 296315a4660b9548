//! # Engine
//!
//! The five sync verbs of `cfgsync`, built from [`cfgsync_store::NamespacedStore`] calls and
//! local file I/O.
//!
//! * `get`, `set`, `del` act on a single config and propagate every error.
//! * `dump` and `restore` act on a whole environment. They stop only for errors that happen
//!   before the first item (target directory, listing); every per-item failure is isolated and
//!   recorded in a [`BulkReport`]. Nothing is rolled back.
//!
//! ```rust
//! use cfgsync_engine::SyncEngine;
//! use cfgsync_store::MemoryClient;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), cfgsync_engine::SyncError> {
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("db.yaml"), "host: 1.2.3.4").unwrap();
//!
//! let engine = SyncEngine::new(MemoryClient::new(), "prod")?;
//! engine.set("db.yaml", dir.path().join("db.yaml")).await?;
//! assert_eq!(engine.get("db.yaml").await?, b"host: 1.2.3.4");
//! engine.close().await;
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
mod fsio;
mod report;

pub use engine::SyncEngine;
pub use error::{SyncError, SyncErrorExt};
pub use report::{BulkReport, ItemOutcome, ItemReport};
