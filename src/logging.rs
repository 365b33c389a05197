//! Tracing setup. The viewer logs to a file since the terminal belongs to the TUI.

use std::io;
use std::path::Path;

use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_FILTER: &str = "pokedex_viewer=info,warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Route tracing output to `path`, creating parent directories.
pub fn init_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = std::fs::File::create(path)?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter())
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| io::Error::other(format!("failed to set tracing subscriber: {e}")))
}

pub fn init_stderr() -> io::Result<()> {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| io::Error::other(format!("failed to set tracing subscriber: {e}")))
}
