use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

use backtail::DEFAULT_CHUNK_SIZE;

/// Top-level config file structure (default.toml)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub tail: TailConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TailConfig {
    #[serde(default = "default_lines")]
    pub lines: usize,
    #[serde(default)]
    pub skip_blank: bool,
    /// Bytes read per backward step
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_lines() -> usize {
    10
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            lines: default_lines(),
            skip_blank: false,
            chunk_size: default_chunk_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Values given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct TailOverrides {
    pub lines: Option<usize>,
    pub skip_blank: bool,
    pub chunk_size: Option<usize>,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content).context("Failed to parse config")?;
        Ok(settings)
    }

    /// Load settings from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    /// Apply command-line overrides on top of the file settings
    pub fn merge(&mut self, overrides: &TailOverrides) {
        if let Some(lines) = overrides.lines {
            self.tail.lines = lines;
        }
        // A flag can only switch skipping on
        if overrides.skip_blank {
            self.tail.skip_blank = true;
        }
        if let Some(chunk_size) = overrides.chunk_size {
            self.tail.chunk_size = chunk_size;
        }
    }

    /// Resolve settings by layering: defaults -> config file -> CLI.
    /// The `[tail]` section is only merged and checked when `tail` is given.
    pub fn resolve(config_path: &Path, tail: Option<&TailOverrides>) -> Result<Self> {
        let mut settings = if config_path.exists() {
            Settings::load(config_path)?
        } else {
            Settings::default()
        };

        settings.validate_log()?;
        if let Some(overrides) = tail {
            settings.merge(overrides);
            settings.validate_tail()?;
        }
        Ok(settings)
    }

    /// Reject a log level the subscriber cannot use
    fn validate_log(&self) -> Result<()> {
        self.log
            .level
            .parse::<LevelFilter>()
            .with_context(|| format!("Invalid log.level '{}'", self.log.level))?;
        Ok(())
    }

    /// Reject tail values the reader cannot use
    fn validate_tail(&self) -> Result<()> {
        if self.tail.lines == 0 {
            bail!("tail.lines must be greater than 0");
        }
        if self.tail.chunk_size == 0 {
            bail!("tail.chunk_size must be greater than 0");
        }
        Ok(())
    }
}
