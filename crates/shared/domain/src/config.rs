use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DIAL_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const DEFAULT_FILE_MODE: u32 = 0o600;
pub const DEFAULT_DIR_MODE: u32 = 0o700;

/// Top-level configuration of the `cfgsync` tool.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub store: StoreSettings,
    pub log: LogSettings,
    pub dump: DumpSettings,
}

/// Key-value store connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Fallback endpoints when none are given on the command line.
    pub endpoints: Vec<String>,
    pub dial_timeout_secs: u64,
    /// Per-request limit; unbounded when absent.
    pub request_timeout_secs: Option<u64>,
    pub credentials: Option<StoreCredentials>,
}

#[derive(Clone, Deserialize)]
pub struct StoreCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Logging output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    /// Optional env-filter directives, e.g. `cfgsync_store=debug`.
    pub filter: Option<String>,
    /// Rolling log files are written here when set.
    pub directory: Option<PathBuf>,
    pub json: bool,
}

/// Permissions of what `dump` creates (unix only).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DumpSettings {
    pub file_mode: u32,
    pub dir_mode: u32,
}

impl StoreSettings {
    #[must_use]
    pub const fn dial_timeout(&self) -> Duration {
        Duration::from_secs(self.dial_timeout_secs)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Endpoints given on the command line win over configured ones.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        if !endpoints.is_empty() {
            self.endpoints = endpoints;
        }
        self
    }
}

// --- Default ---

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            dial_timeout_secs: DEFAULT_DIAL_TIMEOUT_SECS,
            request_timeout_secs: None,
            credentials: None,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_owned(), filter: None, directory: None, json: false }
    }
}

impl Default for DumpSettings {
    fn default() -> Self {
        Self { file_mode: DEFAULT_FILE_MODE, dir_mode: DEFAULT_DIR_MODE }
    }
}
