use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{self, Settings, TailOverrides};

#[derive(Parser, Debug)]
#[command(name = "backtail", version, about = "Print the last lines of large files in bounded memory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (default: ~/.config/backtail/default.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the last lines of a file
    Tail {
        /// File to read
        path: String,

        /// Number of lines
        #[arg(short = 'n', long)]
        lines: Option<usize>,

        /// Drop empty lines; they do not count toward the total
        #[arg(short, long)]
        skip_blank: bool,

        /// Bytes read per backward step
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an empty file (and its parent directories) if missing
    Touch {
        /// File path
        path: String,
    },

    /// Create a directory and any missing parents
    Mkdir {
        /// Directory path
        path: String,

        /// Treat PATH as a file and create its parent directory instead
        #[arg(short, long)]
        parent: bool,
    },

    /// Report whether a directory is empty
    Empty {
        /// Directory path
        path: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct EmptyReport<'a> {
    path: &'a str,
    empty: bool,
}

impl Cli {
    /// Load the config file and layer this invocation's flags over it
    pub fn settings(&self) -> Result<Settings> {
        let config_path = match &self.config {
            Some(path) => {
                let path = config::expand_path(path);
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                path
            }
            None => config::global_config_path()?,
        };

        let overrides = match &self.command {
            Commands::Tail {
                lines,
                skip_blank,
                chunk_size,
                ..
            } => Some(TailOverrides {
                lines: *lines,
                skip_blank: *skip_blank,
                chunk_size: *chunk_size,
            }),
            _ => None,
        };

        Settings::resolve(&config_path, overrides.as_ref())
    }

    /// Log level after applying --verbose / --quiet
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            configured
        }
    }
}

pub fn run(cli: Cli, settings: &Settings, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Tail { path, json, .. } => {
            let file = config::expand_path(&path);
            let lines = backtail::tail_lines_with_chunk_size(
                &file,
                settings.tail.lines,
                settings.tail.skip_blank,
                settings.tail.chunk_size,
            )
            .with_context(|| format!("Failed to tail {}", file.display()))?;
            tracing::debug!(path = %file.display(), count = lines.len(), "Tail complete");
            write_lines(out, &lines, json)?;
        }
        Commands::Touch { path } => {
            let file = config::expand_path(&path);
            backtail::fsutil::ensure_file(&file)
                .with_context(|| format!("Failed to create file: {}", file.display()))?;
        }
        Commands::Mkdir { path, parent } => {
            let dir = config::expand_path(&path);
            let created = if parent {
                backtail::fsutil::ensure_parent_dir(&dir)
            } else {
                backtail::fsutil::ensure_dir(&dir)
            };
            created.with_context(|| format!("Failed to create directory for {}", dir.display()))?;
        }
        Commands::Empty { path, json } => {
            let dir = config::expand_path(&path);
            let empty = backtail::fsutil::is_empty_dir(&dir)
                .with_context(|| format!("Failed to inspect {}", dir.display()))?;
            if json {
                let report = EmptyReport { path: &path, empty };
                writeln!(out, "{}", serde_json::to_string(&report)?)?;
            } else {
                writeln!(out, "{}", empty)?;
            }
        }
    }

    Ok(())
}

fn write_lines(out: &mut impl Write, lines: &[String], json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(lines)?)?;
    } else {
        for line in lines {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}
