use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to seek to offset {offset}: {source}")]
    Seek { offset: u64, source: io::Error },

    #[error("Failed to read chunk at offset {offset}: {source}")]
    Read { offset: u64, source: io::Error },

    #[error("Short read at offset {offset}: expected {expected} bytes")]
    ShortRead { offset: u64, expected: usize },
}

impl Error {
    /// Wrap an I/O error for `path`, promoting `NotFound` to its own variant
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Error::NotFound(path)
        } else {
            Error::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
