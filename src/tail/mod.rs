mod extract;
mod reader;

pub use extract::{extract_lines, Extracted};
pub use reader::{tail_lines, tail_lines_with_chunk_size, tail_reader, DEFAULT_CHUNK_SIZE};
