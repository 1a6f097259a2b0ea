//! spacemap: live ASCII treemap of disk space usage.
//!
//! Thin binary entry point. All logic lives in the `spacemap-core`
//! and `spacemap-tui` crates.

use anyhow::Context;
use clap::Parser;
use spacemap_core::scanner::start_scan;
use spacemap_tui::{App, AppConfig, CrosstermSurface};
use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Environment variable naming a file to write logs to.
const ENV_LOG_FILE: &str = "SPACEMAP_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "spacemap",
    version,
    about = "Draw a live treemap of disk usage while the directory is scanned"
)]
struct Cli {
    /// Directory to scan
    #[arg(value_name = "PATH", default_value = ".")]
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = AppConfig::from_env(cli.path)?;
    tracing::info!(
        "spacemap starting: root={}, refresh={:?}",
        config.root.display(),
        config.refresh_rate
    );

    let scan = start_scan(config.root.clone())?;
    // Raw mode only turns a typed Ctrl-C into a key. Signals from other
    // processes raise this flag and the loop exits through teardown.
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
        .context("cannot install signal handler")?;

    let mut app =
        App::new(CrosstermSurface::new(), scan, &config).with_shutdown_flag(shutdown);
    app.start()?;

    let stats = app.stats();
    tracing::info!(
        "spacemap exiting: {} files, {} dirs, {} bytes",
        stats.files_found,
        stats.dirs_found,
        stats.total_size
    );
    Ok(())
}

/// The terminal belongs to the treemap, so logs go to the file named by
/// `SPACEMAP_LOG` when set. Otherwise only warnings reach stderr, which the
/// alternate screen hides until exit.
fn init_logging() -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt().with_target(false);

    let result = match std::env::var_os(ENV_LOG_FILE) {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("cannot create log file {}", path.to_string_lossy()))?;
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            builder
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
            builder
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
        }
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}
