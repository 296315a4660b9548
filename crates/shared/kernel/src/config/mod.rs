use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

/// File looked up in the working directory when no explicit path is given (any supported extension).
pub const DEFAULT_CONFIG_NAME: &str = "cfgsync";
/// Prefix of environment overrides, e.g. `CFGSYNC__STORE__DIAL_TIMEOUT_SECS=5`.
pub const ENV_PREFIX: &str = "CFGSYNC";

const ENV_SEPARATOR: &str = "__";
const LIST_KEYS: [&str; 1] = ["store.endpoints"];

/// Custom error type for config loading.
#[cfgsync_derive::cfgsync_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from an optional file overlaid with environment variables.
///
/// Layers, lowest priority first:
/// 1. **File**: `path` if given (then it must exist), otherwise `cfgsync.{toml,yaml,json,..}` in
///    the working directory if present.
/// 2. **Environment**: variables prefixed with `CFGSYNC__`, nested with `__`
///    (`CFGSYNC__LOG__LEVEL=debug` maps to `log.level`). `CFGSYNC__STORE__ENDPOINTS` takes a
///    comma-separated list.
///
/// Missing layers fall back to the `#[serde(default)]` values of `T`.
///
/// # Errors
///
/// Returns [`ConfigError::Config`] if an explicit file is missing, a file cannot be parsed, or
/// the merged values do not fit `T`.
pub fn load_config<T>(path: Option<&Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_with_env(path, None)
}

fn load_with_env<T>(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading config file");
            File::from(path).required(true)
        },
        None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let mut environment = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .list_separator(",")
        .try_parsing(true)
        .source(env);
    for key in LIST_KEYS {
        environment = environment.with_list_parse_key(key);
    }

    let config = Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgsync_domain::config::SyncConfig;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect())
    }

    #[test]
    fn defaults_without_any_source() {
        let cfg: SyncConfig = load_with_env(None, env(&[])).unwrap();
        assert!(cfg.store.endpoints.is_empty());
        assert_eq!(cfg.store.dial_timeout_secs, 15);
        assert_eq!(cfg.log.level, "warn");
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_with_env::<SyncConfig>(Some(missing.as_path()), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Config { .. }));
    }

    #[test]
    fn file_values_are_loaded() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[store]\nendpoints = [\"http://10.0.0.1:2379\"]\ndial_timeout_secs = 3\n\n[dump]\nfile_mode = 0o640"
        )
        .unwrap();

        let cfg: SyncConfig = load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(cfg.store.endpoints, ["http://10.0.0.1:2379"]);
        assert_eq!(cfg.store.dial_timeout_secs, 3);
        assert_eq!(cfg.dump.file_mode, 0o640);
        assert_eq!(cfg.dump.dir_mode, 0o700);
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[log]\nlevel = \"info\"").unwrap();

        let cfg: SyncConfig = load_with_env(
            Some(file.path()),
            env(&[
                ("CFGSYNC__LOG__LEVEL", "debug"),
                ("CFGSYNC__STORE__ENDPOINTS", "http://a:2379,http://b:2379"),
                ("CFGSYNC__STORE__REQUEST_TIMEOUT_SECS", "4"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.log.level, "debug");
        assert_eq!(cfg.store.endpoints, ["http://a:2379", "http://b:2379"]);
        assert_eq!(cfg.store.request_timeout_secs, Some(4));
    }
}
