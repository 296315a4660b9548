//! Kernel utilities shared by the `cfgsync` binaries.
//! Keep this crate lightweight; today it only layers configuration sources.
//!
//! ```rust,no_run
//! use cfgsync_kernel::config::load_config;
//! use cfgsync_kernel::domain::config::SyncConfig;
//!
//! let cfg: SyncConfig = load_config(None).unwrap();
//! println!("{:?}", cfg.store.endpoints);
//! ```
pub mod config;

pub use cfgsync_domain as domain;
