//! Read the last lines of a file by walking it backward in small chunks.
//!
//! Memory stays bounded by the chunk size plus the longest line still being
//! resolved, so the tail of a multi-gigabyte log costs about as much as the
//! tail of a small one.

pub mod error;
pub mod fsutil;
pub mod tail;

pub use error::{Error, Result};
pub use tail::{tail_lines, tail_lines_with_chunk_size, DEFAULT_CHUNK_SIZE};
