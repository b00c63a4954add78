//! Logger initialization.
//!
//! The terminal belongs to the UI, so records go to ~/.slogi/slogi.log.

use super::persistence::data_path;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Once;

pub const LOG_FILE: &str = "slogi.log";

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `env_logger` filter syntax, e.g. "debug" or "slogi::race=trace".
    pub filter: Option<String>,
}

static INIT: Once = Once::new();

/// Pick the filter: explicit setting, then `RUST_LOG`, then "info".
pub fn resolve_filter(explicit: Option<&str>, env: Option<&str>) -> String {
    let usable = |f: &&str| !f.trim().is_empty();
    explicit
        .filter(usable)
        .or(env.filter(usable))
        .unwrap_or("info")
        .to_string()
}

/// Initialize the global logger once, appending to the log file.
/// Returns the log file path; calls after the first leave the logger as is.
pub fn init_logging(config: LoggingConfig) -> io::Result<PathBuf> {
    let path = data_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let env = std::env::var("RUST_LOG").ok();
    let filter = resolve_filter(config.filter.as_deref(), env.as_deref());

    INIT.call_once(move || {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.target(env_logger::Target::Pipe(Box::new(file)));
        builder.write_style(env_logger::WriteStyle::Never);
        // A test harness may have installed a logger already
        if builder.try_init().is_ok() {
            log::debug!("logging initialized ({})", filter);
        }
    });
    Ok(path)
}
