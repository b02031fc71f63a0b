// src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod counter;
pub mod error;
pub mod logfile;
pub mod report;
pub mod scanner;
pub mod stats;
pub mod walker;

pub use error::{Result, ScanError};
pub use scanner::{ScanOptions, Scanner};
pub use stats::{ExtensionStats, ScanReport};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
