use std::path::PathBuf;

use anyhow::{Context, Result};

/// Returns the backtail config directory: ~/.config/backtail
pub fn config_dir() -> Result<PathBuf> {
    let config = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config.join("backtail"))
}

/// Returns the global config path: ~/.config/backtail/default.toml
pub fn global_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("default.toml"))
}

/// Expands a leading `~` in a user-supplied path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
