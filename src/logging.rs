//! Log setup.
//!
//! The terminal is in raw mode on the alternate screen, so log lines go to a
//! file named by `$GLYPHCAST_LOG_PATH`. Without it logging stays off.
//! `RUST_LOG` filters as usual and defaults to `info`.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};

pub const LOG_PATH_ENV: &str = "GLYPHCAST_LOG_PATH";

/// Initialize logging from the environment. Returns whether a logger was installed.
pub fn init_from_env() -> Result<bool> {
    match std::env::var_os(LOG_PATH_ENV) {
        Some(path) if !path.is_empty() => {
            init_to_file(Path::new(&path))?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

pub fn init_to_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    // A logger may already be installed (e.g. by a test harness).
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init();
    Ok(())
}
