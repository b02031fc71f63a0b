// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Error type shared across the crate.
///
/// Only conditions that abort an operation live here. Per-file read
/// failures and unreadable subtrees are not errors: the scan isolates
/// them and reports them through the skip counters on the report.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root does not exist or is not a directory. Fatal and
    /// detected before any accumulator state is touched.
    #[error("invalid root path '{}': not an existing directory", .path.display())]
    InvalidRoot { path: PathBuf },

    #[error("I/O failure on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("thread pool creation failed: {details}")]
    ThreadPool { details: String },
}

pub type Result<T> = std::result::Result<T, ScanError>;
