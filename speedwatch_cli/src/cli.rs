//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "speedwatch", version, about = "Accelerometer speed watcher")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/speedwatch.toml")]
    pub config: PathBuf,

    /// Emit results as JSON on stdout (logs go to stderr either way)
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calibrate, then estimate and report speed until interrupted
    Run {
        /// Stop after this many ticks instead of running until ctrl-c
        #[arg(long, value_name = "N")]
        ticks: Option<u64>,
        /// Override the configured vehicle identifier
        #[arg(long, value_name = "ID")]
        vehicle_id: Option<u32>,
    },
    /// Run bias calibration only and print the result
    Calibrate {
        /// Override the configured calibration sample count
        #[arg(long, value_name = "N")]
        samples: Option<u32>,
    },
}
