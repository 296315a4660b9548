use cfgsync_logger::{LevelFilter, Logger};

#[test]
fn console_only_logger_has_no_file_guard() {
    let logger = Logger::builder()
        .name("cfgsync-console-only")
        .ansi(false)
        .level(LevelFilter::INFO)
        .init()
        .expect("logger should initialize");

    tracing::info!(env = "prod", "console event goes to stderr");

    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");
}
