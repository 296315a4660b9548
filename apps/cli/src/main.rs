mod args;
mod commands;

use crate::args::Cli;
use anyhow::Context;
use cfgsync_engine::SyncEngine;
use cfgsync_kernel::config::load_config;
use cfgsync_kernel::domain::config::{LogSettings, SyncConfig};
use cfgsync_logger::{LevelFilter, Logger, LoggerError, parse_level};
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing::{debug, warn};

const NO_ENDPOINTS: &str = "no store endpoint given\n\n\
    Pass endpoints after the verb arguments, e.g. `cfgsync get prod db.yaml http://127.0.0.1:2379`,\n\
    or set `store.endpoints` in the configuration file or CFGSYNC__STORE__ENDPOINTS.";

#[cfgsync_runtime::main(sequential)]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cfg: SyncConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;

    let level = parse_level(cli.log_level.as_deref().unwrap_or(&cfg.log.level))?;
    let _log = init_logger(level, &cfg.log)?;

    let store = cfg.store.with_endpoints(cli.verb.endpoints().to_vec());
    if store.endpoints.is_empty() {
        Cli::command().error(clap::error::ErrorKind::MissingRequiredArgument, NO_ENDPOINTS).exit();
    }

    debug!(env = cli.verb.env(), endpoints = ?store.endpoints, "Connecting to store");
    let engine = SyncEngine::connect(&store, cli.verb.env()).await?.with_dump_settings(cfg.dump);

    let result =
        commands::run(&engine, cli.verb, &mut std::io::stdout(), &mut std::io::stderr()).await;
    engine.close().await;

    let clean = result?;
    if !clean {
        warn!("Finished with failed items");
    }
    Ok(if clean { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_logger(level: LevelFilter, log: &LogSettings) -> Result<Logger, LoggerError> {
    let mut builder = Logger::builder().name(env!("CARGO_BIN_NAME")).level(level);
    if let Some(filter) = &log.filter {
        builder = builder.env_filter(filter);
    }

    match &log.directory {
        Some(dir) => builder.path(dir).json(log.json).init(),
        None => builder.init(),
    }
}
