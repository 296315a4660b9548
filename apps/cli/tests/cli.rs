use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// Nothing listens here; every test below must finish before a connection is attempted.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:1";

fn cfgsync(cwd: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cfgsync"));
    cmd.current_dir(cwd.path())
        .env_remove("CFGSYNC__STORE__ENDPOINTS")
        .env_remove("CFGSYNC__LOG__LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_flag_prints_version_and_build_time() {
    let cwd = TempDir::new().unwrap();
    for flag in ["-v", "--version"] {
        cfgsync(&cwd)
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
            .stdout(predicate::str::contains("built"));
    }
}

#[test]
fn no_arguments_is_a_usage_error() {
    let cwd = TempDir::new().unwrap();
    cfgsync(&cwd).assert().code(2).stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_verb_arguments_is_a_usage_error() {
    let cwd = TempDir::new().unwrap();
    cfgsync(&cwd).args(["set", "prod", "db.yaml"]).assert().code(2);
    cfgsync(&cwd).args(["get"]).assert().code(2);
}

#[test]
fn unknown_verb_is_a_usage_error() {
    let cwd = TempDir::new().unwrap();
    cfgsync(&cwd).args(["list", "prod"]).assert().code(2);
}

#[test]
fn missing_endpoints_is_a_usage_error() {
    let cwd = TempDir::new().unwrap();
    cfgsync(&cwd)
        .args(["get", "prod", "db.yaml"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no store endpoint given"));
}

#[test]
fn explicit_config_file_must_exist() {
    let cwd = TempDir::new().unwrap();
    cfgsync(&cwd)
        .args(["--config", "missing.toml", "get", "prod", "db.yaml", DEAD_ENDPOINT])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration is malformed"));
}

#[test]
fn invalid_log_level_fails() {
    let cwd = TempDir::new().unwrap();
    cfgsync(&cwd)
        .args(["--log-level", "loud", "get", "prod", "db.yaml", DEAD_ENDPOINT])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid log level"));
}

#[test]
fn invalid_environment_fails_before_dialing() {
    let cwd = TempDir::new().unwrap();
    cfgsync(&cwd)
        .args(["get", "prod/eu", "db.yaml", DEAD_ENDPOINT])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid name"));
}

#[test]
fn debug_level_logs_the_connect_attempt() {
    let cwd = TempDir::new().unwrap();
    cfgsync(&cwd)
        .args(["--log-level", "debug", "get", "prod/eu", "db.yaml", DEAD_ENDPOINT])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Connecting to store"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn default_config_file_supplies_endpoints() {
    let cwd = TempDir::new().unwrap();
    // An invalid environment stops the run before any dial, proving the endpoint check passed.
    std::fs::write(cwd.path().join("cfgsync.toml"), format!("[store]\nendpoints = [\"{DEAD_ENDPOINT}\"]\n"))
        .unwrap();

    cfgsync(&cwd)
        .args(["del", "bad env", "db.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid name"))
        .stderr(predicate::str::contains("no store endpoint").not());
}
