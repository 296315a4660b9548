//! # Runtime
//!
//! Standardized [Tokio](https://tokio.rs) runtime construction for the workspace.
//!
//! ## Profiles
//! * **Sequential**: A current-thread runtime. Every store call and file operation is awaited
//!   one after another on the calling thread; there is no worker pool to fan work out to.
//!
//! ## Example
//!
//! ```rust,ignore
//! #[cfgsync_runtime::main(sequential)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use cfgsync_derive::main;

use anyhow::anyhow;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Scheduling profile of a runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuntimeProfile {
    /// Current-thread scheduler, no worker pool.
    #[default]
    Sequential,
}

/// Creates a new Tokio runtime for the given profile with I/O and timers enabled.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the runtime cannot be created, typically due to
/// OS-level limitations.
pub fn build_runtime(profile: RuntimeProfile) -> Result<Runtime> {
    debug!(?profile, "Building tokio runtime");

    let mut builder = match profile {
        RuntimeProfile::Sequential => Builder::new_current_thread(),
    };

    builder.enable_all();

    builder.build().map_err(|e| anyhow!("Failed to initialize runtime: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_is_the_default_profile() {
        assert_eq!(RuntimeProfile::default(), RuntimeProfile::Sequential);
    }

    #[test]
    fn sequential_runtime_stays_on_the_calling_thread() {
        let rt = build_runtime(RuntimeProfile::Sequential).unwrap();
        let caller = std::thread::current().id();
        let inside = rt.block_on(async { std::thread::current().id() });
        assert_eq!(inside, caller);
    }

    #[test]
    fn sequential_runtime_runs_futures() {
        let rt = build_runtime(RuntimeProfile::Sequential).unwrap();
        let value = rt.block_on(async { 40 + 2 });
        assert_eq!(value, 42);
    }
}
