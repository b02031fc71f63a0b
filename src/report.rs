// src/report.rs
use std::fmt::Write as _;

use serde::Serialize;

use crate::stats::ScanReport;

/// Serialized shape of a finished scan for `--format json`.
#[derive(Debug, Serialize)]
struct JsonReport {
    path: String,
    elapsed_seconds: f64,
    total_lines: u64,
    files_counted: u64,
    files_skipped: u64,
    dirs_skipped: u64,
    extensions: Vec<JsonExtension>,
}

#[derive(Debug, Serialize)]
struct JsonExtension {
    ext: String,
    lines: u64,
}

/// Render the per-extension table, total and elapsed time.
///
/// Rows are ordered by descending line count. Layout follows the format
/// established by earlier releases of this tool, so downstream parsers of
/// the text output keep working.
#[must_use]
pub fn render_table(report: &ScanReport) -> String {
    let mut out = String::new();

    writeln!(out, "\nLines of code by file type:\n ----------------").unwrap();
    for (ext, lines) in report.stats.sorted() {
        writeln!(out, "{ext:<10} : {lines:>12} lines").unwrap();
    }
    writeln!(out, "\n ----------------\n").unwrap();
    writeln!(out, "Total: {:>12} Lines", report.total).unwrap();
    writeln!(out, "Time:  {:>12.3} s", report.elapsed.as_secs_f64()).unwrap();

    if report.files_skipped > 0 {
        writeln!(out, "Skipped: {} unreadable file(s)", report.files_skipped).unwrap();
    }
    if report.dirs_skipped > 0 {
        writeln!(out, "Skipped: {} unreadable directories", report.dirs_skipped).unwrap();
    }

    out
}

/// Render the scan as pretty-printed JSON.
#[must_use]
pub fn render_json(report: &ScanReport) -> String {
    let extensions = report
        .stats
        .sorted()
        .into_iter()
        .map(|(ext, lines)| JsonExtension { ext, lines })
        .collect();

    let json = JsonReport {
        path: report.root.display().to_string(),
        elapsed_seconds: report.elapsed.as_secs_f64(),
        total_lines: report.total,
        files_counted: report.files_counted,
        files_skipped: report.files_skipped,
        dirs_skipped: report.dirs_skipped,
        extensions,
    };

    serde_json::to_string_pretty(&json).unwrap_or_default()
}
