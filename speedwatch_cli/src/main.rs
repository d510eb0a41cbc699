use clap::Parser;
use eyre::{Result, WrapErr};
use speedwatch_config::Config;
use std::fs;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod run;

use cli::{Cli, Commands, FILE_GUARD};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    let (cfg, found) = load_config(&args.config)?;
    cfg.validate().wrap_err("invalid configuration")?;
    init_tracing(&args, &cfg.logging)?;
    if !found {
        tracing::info!(path = %args.config.display(), "config file not found; using defaults");
    }

    match args.cmd {
        Commands::Run { ticks, vehicle_id } => run::run(&args, &cfg, ticks, vehicle_id),
        Commands::Calibrate { samples } => run::calibrate_only(&args, &cfg, samples),
    }
}

fn load_config(path: &Path) -> Result<(Config, bool)> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        let cfg: Config = toml::from_str(&content)
            .wrap_err_with(|| format!("failed to parse config {}", path.display()))?;
        Ok((cfg, true))
    } else {
        Ok((Config::default(), false))
    }
}

fn init_tracing(args: &Cli, logging: &speedwatch_config::Logging) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    // Optional JSON-lines file layer
    let file_layer = match logging.file.as_deref() {
        Some(path) => {
            let p = Path::new(path);
            let dir = match p.parent() {
                Some(d) if !d.as_os_str().is_empty() => d,
                _ => Path::new("."),
            };
            let name = p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "speedwatch.log".to_string());
            let rotation = match logging.rotation.as_deref() {
                Some("daily") => Rotation::DAILY,
                Some("hourly") => Rotation::HOURLY,
                _ => Rotation::NEVER,
            };
            let appender = RollingFileAppender::new(rotation, dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().json().with_ansi(false).with_writer(writer))
        }
        None => None,
    };

    // Console logs always go to stderr so --json output stays parseable.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
    Ok(())
}
