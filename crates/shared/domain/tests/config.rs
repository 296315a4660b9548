use cfgsync_domain::config::{
    DumpSettings, LogSettings, StoreCredentials, StoreSettings, SyncConfig,
};
use serde_json::json;
use std::time::Duration;

#[test]
fn config_defaults_are_sane() {
    let store = StoreSettings::default();
    assert!(store.endpoints.is_empty());
    assert_eq!(store.dial_timeout(), Duration::from_secs(15));
    assert!(store.request_timeout().is_none());

    let log = LogSettings::default();
    assert_eq!(log.level, "warn");
    assert!(log.directory.is_none());

    let dump = DumpSettings::default();
    assert_eq!(dump.file_mode, 0o600);
    assert_eq!(dump.dir_mode, 0o700);
}

#[test]
fn sync_config_deserializes_partial_documents() {
    let raw = json!({
        "store": { "endpoints": ["http://10.0.0.1:2379"], "request_timeout_secs": 5 },
        "log": { "level": "debug" }
    });

    let cfg: SyncConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.store.endpoints, ["http://10.0.0.1:2379"]);
    assert_eq!(cfg.store.dial_timeout_secs, 15);
    assert_eq!(cfg.store.request_timeout(), Some(Duration::from_secs(5)));
    assert_eq!(cfg.log.level, "debug");
    assert_eq!(cfg.dump.file_mode, 0o600);
}

#[test]
fn command_line_endpoints_win() {
    let configured = StoreSettings { endpoints: vec!["http://cfg:2379".to_owned()], ..StoreSettings::default() };

    let kept = configured.clone().with_endpoints(Vec::new());
    assert_eq!(kept.endpoints, ["http://cfg:2379"]);

    let replaced = configured.with_endpoints(vec!["http://cli:2379".to_owned()]);
    assert_eq!(replaced.endpoints, ["http://cli:2379"]);
}

#[test]
fn credentials_debug_hides_the_password() {
    let creds = StoreCredentials { username: "root".into(), password: "hunter2".into() };
    let store = StoreSettings { credentials: Some(creds), ..StoreSettings::default() };

    let printed = format!("{store:?}");
    assert!(printed.contains("root"));
    assert!(printed.contains("<redacted>"));
    assert!(!printed.contains("hunter2"));
}
