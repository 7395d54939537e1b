//! Config file loading.
//!
//! Lookup order: `--config` flag, then `$GLYPHCAST_CONFIG`, then
//! `glyphcast.json` in the working directory. A missing or broken file never
//! stops the game; [`load_or_default`] logs a warning and uses defaults.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::types::GameConfig;

pub const CONFIG_ENV: &str = "GLYPHCAST_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "glyphcast.json";

/// Pick the config path to read, if any.
///
/// The environment value is passed in so callers (and tests) control it.
pub fn resolve_config_path(cli: Option<&Path>, env: Option<OsString>) -> Option<PathBuf> {
    if let Some(path) = cli {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(path));
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
    fallback.is_file().then_some(fallback)
}

pub fn parse_config(text: &str) -> Result<GameConfig> {
    serde_json::from_str(text).context("invalid config JSON")
}

pub fn load_config(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in {}", path.display()))
}

/// Resolve and load the config, falling back to defaults on any failure.
pub fn load_or_default(cli: Option<&Path>) -> GameConfig {
    let Some(path) = resolve_config_path(cli, std::env::var_os(CONFIG_ENV)) else {
        info!("no config file, using defaults");
        return GameConfig::default();
    };
    match load_config(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            warn!("{e:#}; using default config");
            GameConfig::default()
        }
    }
}
