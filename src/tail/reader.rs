use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use super::extract::{decode, extract_lines};
use crate::error::{Error, Result};

/// Bytes read per backward step
pub const DEFAULT_CHUNK_SIZE: usize = 122;

/// Return the last `requested` lines of the file at `path`, oldest first.
///
/// A blank first line counts like any other: `"\nx\n"` yields `["", "x"]`.
pub fn tail_lines(path: impl AsRef<Path>, requested: usize, skip_blank: bool) -> Result<Vec<String>> {
    tail_lines_with_chunk_size(path, requested, skip_blank, DEFAULT_CHUNK_SIZE)
}

/// Same as [`tail_lines`] with an explicit chunk size.
pub fn tail_lines_with_chunk_size(
    path: impl AsRef<Path>,
    requested: usize,
    skip_blank: bool,
    chunk_size: usize,
) -> Result<Vec<String>> {
    let path = path.as_ref();
    validate(requested, chunk_size)?;

    let mut file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Open {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let len = file.metadata().map_err(|e| Error::io(path, e))?.len();

    tracing::debug!(path = %path.display(), size = len, requested, "Tailing file");
    tail_reader(&mut file, len, requested, skip_blank, chunk_size)
}

/// Walk `reader` backward from byte `len` and collect its last `requested` lines.
///
/// `len` is trusted: the reader must be able to supply every byte below it,
/// and a chunk that comes back short fails the whole call.
pub fn tail_reader<R: Read + Seek>(
    reader: &mut R,
    len: u64,
    requested: usize,
    skip_blank: bool,
    chunk_size: usize,
) -> Result<Vec<String>> {
    validate(requested, chunk_size)?;

    let mut remaining = len;
    // Unresolved bytes, latest in file first. None of them holds a newline.
    let mut pending: Vec<Vec<u8>> = Vec::new();
    let mut lines: Vec<String> = Vec::new();

    while remaining > 0 && lines.len() < requested {
        let size = remaining.min(chunk_size as u64);
        let offset = remaining - size;
        let mut chunk = read_chunk(reader, offset, size as usize)?;
        tracing::trace!(offset, size, pending = pending.len(), "Read chunk");

        // The final newline ends the last line rather than opening an empty one
        if remaining == len && chunk.last() == Some(&b'\n') {
            chunk.pop();
        }
        remaining = offset;

        // Only the new bytes can hold a boundary; until one shows up the
        // partial line just accumulates
        if remaining > 0 && !chunk.contains(&b'\n') {
            pending.push(chunk);
            continue;
        }

        let buffer = join(chunk, &mut pending);
        let extracted = extract_lines(&buffer, requested, skip_blank, lines);
        lines = extracted.lines;
        pending.push(extracted.remaining.to_vec());
    }

    // Whatever is left at the start of the file is its first line
    if remaining == 0 && len > 0 && lines.len() < requested {
        let first = decode(&join(Vec::new(), &mut pending));
        if !(skip_blank && first.is_empty()) {
            lines.insert(0, first);
        }
    }

    if lines.len() > requested {
        lines.drain(..lines.len() - requested);
    }

    Ok(lines)
}

/// Prepend `head` to the pending pieces, draining them into one buffer.
fn join(mut head: Vec<u8>, pending: &mut Vec<Vec<u8>>) -> Vec<u8> {
    head.reserve(pending.iter().map(Vec::len).sum());
    for piece in pending.drain(..).rev() {
        head.extend_from_slice(&piece);
    }
    head
}

fn read_chunk<R: Read + Seek>(reader: &mut R, offset: u64, size: usize) -> Result<Vec<u8>> {
    reader
        .seek(SeekFrom::Start(offset))
        .map_err(|source| Error::Seek { offset, source })?;

    let mut chunk = vec![0u8; size];
    reader.read_exact(&mut chunk).map_err(|source| match source.kind() {
        io::ErrorKind::UnexpectedEof => Error::ShortRead {
            offset,
            expected: size,
        },
        _ => Error::Read { offset, source },
    })?;
    Ok(chunk)
}

fn validate(requested: usize, chunk_size: usize) -> Result<()> {
    if requested == 0 {
        return Err(Error::InvalidArgument(
            "number of lines must be greater than 0".to_string(),
        ));
    }
    if chunk_size == 0 {
        return Err(Error::InvalidArgument(
            "chunk size must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
