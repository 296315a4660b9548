//! # CLI Argument Definitions
//!
//! Every verb takes the environment first, its own arguments next, and any number of store
//! endpoints last. Endpoints may be omitted when `store.endpoints` is configured.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("CFGSYNC_BUILD_TIME"), ")");

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "cfgsync")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = VERSION)]
#[command(disable_version_flag = true)]
#[command(arg_required_else_help = true)]
#[command(about = "Synchronize configuration files with an environment in etcd")]
pub(crate) struct Cli {
    /// Configuration file [default: ./cfgsync.{toml,yaml,json} if present]
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Log level for diagnostics on stderr (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub(crate) log_level: Option<String>,

    /// Print version and build time
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    #[command(subcommand)]
    pub(crate) verb: Verb,
}

/// The sync verbs.
#[derive(Debug, Subcommand)]
pub(crate) enum Verb {
    /// Print a config value to stdout, byte for byte
    Get {
        env: String,
        name: String,
        /// Store endpoints, e.g. http://127.0.0.1:2379
        endpoints: Vec<String>,
    },
    /// Publish the contents of a local file
    Set {
        env: String,
        name: String,
        file: PathBuf,
        /// Store endpoints, e.g. http://127.0.0.1:2379
        endpoints: Vec<String>,
    },
    /// Remove a config (succeeds when it does not exist)
    Del {
        env: String,
        name: String,
        /// Store endpoints, e.g. http://127.0.0.1:2379
        endpoints: Vec<String>,
    },
    /// Write every config of the environment into a directory
    Dump {
        env: String,
        dir: PathBuf,
        /// Store endpoints, e.g. http://127.0.0.1:2379
        endpoints: Vec<String>,
    },
    /// Store every file of a directory into the environment
    Restore {
        env: String,
        dir: PathBuf,
        /// Store endpoints, e.g. http://127.0.0.1:2379
        endpoints: Vec<String>,
    },
}

impl Verb {
    pub(crate) fn env(&self) -> &str {
        match self {
            Self::Get { env, .. }
            | Self::Set { env, .. }
            | Self::Del { env, .. }
            | Self::Dump { env, .. }
            | Self::Restore { env, .. } => env,
        }
    }

    pub(crate) fn endpoints(&self) -> &[String] {
        match self {
            Self::Get { endpoints, .. }
            | Self::Set { endpoints, .. }
            | Self::Del { endpoints, .. }
            | Self::Dump { endpoints, .. }
            | Self::Restore { endpoints, .. } => endpoints,
        }
    }
}
