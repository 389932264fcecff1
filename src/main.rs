//! Smart Leave - leave and leave-encashment management from the terminal.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use smart_leave as app;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use app::LeaveDesk;
use app::cli::Cli;
use app::config::{AppConfig, ConfigLoadResult, LoggingConfig};
use app::storage::JsonFileStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    let loaded = AppConfig::try_load(&config_path);
    let mut config = match &loaded {
        ConfigLoadResult::Loaded(config) => config.clone(),
        ConfigLoadResult::Missing => AppConfig::default(),
        ConfigLoadResult::Invalid(e) => {
            anyhow::bail!("Config {} is invalid: {e}", config_path.display());
        }
    };
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }

    let _guard = init_logging(&config.logging);

    if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
    }
    match loaded {
        ConfigLoadResult::Loaded(_) => tracing::info!("Config loaded from {:?}", config_path),
        _ => tracing::info!("No config at {:?}, using defaults", config_path),
    }

    let store = JsonFileStore::open(&config.storage.data_dir)
        .with_context(|| format!("Failed to open data directory {}", config.storage.data_dir.display()))?;
    let today = Local::now().date_naive();
    let delay = config.ui.processing_delay();
    let mut desk = LeaveDesk::open(store, config, today).context("Failed to load saved data")?;

    if cli.command.commits() && !delay.is_zero() {
        tracing::debug!("Processing for {:?}", delay);
        tokio::time::sleep(delay).await;
    }

    app::cli::run(&mut desk, cli.command)
}

/// Initialize logging: stderr by default, or a daily file when configured.
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match &config.file_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "smart-leave.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}
