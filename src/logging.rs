use std::path::PathBuf;

use color_eyre::Result;
use directories::BaseDirs;
use tracing::Level;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, filter::Directive, fmt, prelude::*};

use crate::config::PROJECT_NAME;

lazy_static::lazy_static! {
    pub static ref LOG_FILE: String = format!("{}-filters.log", env!("CARGO_PKG_NAME"));
    /// Env var holding filter directives, e.g. `DTFILTER_LOG=dtfilter::binder=debug`
    pub static ref LOG_ENV: String = format!("{}_LOG", PROJECT_NAME.clone());
}

/// Directory the log file goes to unless a path is given
pub fn get_log_dir() -> PathBuf {
    match BaseDirs::new() {
        Some(base) => base.data_local_dir().join(env!("CARGO_PKG_NAME")),
        None => PathBuf::from("."),
    }
}

/// Only this crate's events, at `level`; the host application's own
/// tracing output is left to its own subscriber setup.
fn crate_directive(level: Level) -> Result<Directive> {
    Ok(format!("{}={}", env!("CARGO_CRATE_NAME"), level).parse::<Directive>()?)
}

/// Initialize logging with default settings: INFO for restore summaries,
/// WARN and above for ignored tokens, persisted state and events
pub fn init() -> Result<()> {
    init_with(None, None)
}

/// Initialize logging with custom path and/or level.
///
/// Directives in `DTFILTER_LOG` refine the filter on top of the default.
pub fn init_with(custom_log_path: Option<PathBuf>, level: Option<Level>) -> Result<()> {
    let log_path = custom_log_path.unwrap_or_else(|| get_log_dir().join(LOG_FILE.as_str()));
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let env_filter = EnvFilter::builder()
        .with_env_var(LOG_ENV.as_str())
        .with_default_directive(crate_directive(level.unwrap_or(Level::INFO))?)
        .from_env_lossy();

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::sync::Mutex::new(file))
        .with_target(true)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
