// src/logfile.rs
use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

use crate::{
    error::{Result, ScanError},
    stats::ScanReport,
};

/// Write the scan summary to a timestamped log file in `dir`.
///
/// The file name is a sortable local timestamp (`%Y-%m-%d_%H-%M-%S.log`),
/// so consecutive runs line up chronologically in a directory listing.
/// Returns the path of the file that was written.
///
/// # Errors
///
/// [`ScanError::Io`] when the log file cannot be written.
pub fn write_log_in(dir: &Path, report: &ScanReport) -> Result<PathBuf> {
    let now = Local::now();
    let path = dir.join(format!("{}.log", now.format("%Y-%m-%d_%H-%M-%S")));
    fs::write(&path, render(report, &now))
        .map_err(|source| ScanError::Io { path: path.clone(), source })?;
    Ok(path)
}

/// Write the log into the process working directory.
///
/// # Errors
///
/// [`ScanError::Io`] when the working directory cannot be resolved or the
/// file cannot be written.
pub fn write_log(report: &ScanReport) -> Result<PathBuf> {
    let cwd = std::env::current_dir()
        .map_err(|source| ScanError::Io { path: PathBuf::from("."), source })?;
    write_log_in(&cwd, report)
}

fn render(report: &ScanReport, now: &DateTime<Local>) -> String {
    let mut out = String::new();
    writeln!(out, "{} | path: {}", now.format("%Y-%m-%d %H:%M:%S"), report.root.display()).unwrap();
    writeln!(out, "elapsed: {:.3} s", report.elapsed.as_secs_f64()).unwrap();
    writeln!(out, "total lines: {}", report.total).unwrap();
    writeln!(out, "by extension:").unwrap();
    for (ext, lines) in report.stats.sorted() {
        writeln!(out, "  {ext}: {lines}").unwrap();
    }
    out
}
