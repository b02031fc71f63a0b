// src/counter.rs
use std::{fs::File, io::Read, path::Path};

/// Chunk size for sequential reads. Large enough to amortise syscall
/// overhead, small enough that the buffer stays cheap per worker.
pub const READ_CHUNK_BYTES: usize = 64 * 1024;

/// Count newline (`0x0A`) bytes in the file at `path`.
///
/// The file is treated as an opaque byte stream, so the result is equally
/// defined for text and binary files. A file whose last line lacks a
/// trailing newline reports one line fewer than an editor would show;
/// downstream consumers rely on that historical behaviour, so it is kept
/// rather than corrected here.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be opened or
/// read. The skip-and-continue policy for unreadable files lives in the
/// scanner, which maps the error to a zero contribution.
pub fn count_newlines(path: &Path) -> std::io::Result<u64> {
    let mut file = File::open(path)?;
    let mut buf = [0u8; READ_CHUNK_BYTES];
    let mut lines: u64 = 0;
    loop {
        match file.read(&mut buf)? {
            0 => return Ok(lines),
            n => lines += bytecount::count(&buf[..n], b'\n') as u64,
        }
    }
}
