// src/stats.rs
use std::{collections::HashMap, path::PathBuf, time::Duration};

/// Mapping from file extension to cumulative newline count.
///
/// Built up during a single scan and handed out read-only afterwards.
/// Iteration order of the underlying map is unspecified; ordered views
/// come from [`ExtensionStats::sorted`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionStats {
    counts: HashMap<String, u64>,
}

impl ExtensionStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-or-increment the entry for `ext`. Adding zero still creates
    /// the key, so an extension whose only file is empty (or unreadable)
    /// remains visible in the result.
    pub fn add(&mut self, ext: impl Into<String>, lines: u64) {
        *self.counts.entry(ext.into()).or_insert(0) += lines;
    }

    /// Element-wise addition. Merging is commutative and associative, so
    /// parallel workers can fold local maps in any order.
    pub fn merge(&mut self, other: ExtensionStats) {
        for (ext, lines) in other.counts {
            *self.counts.entry(ext).or_insert(0) += lines;
        }
    }

    #[must_use]
    pub fn get(&self, ext: &str) -> Option<u64> {
        self.counts.get(ext).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Grand total across all extensions. Callers compute this once per
    /// scan and carry it on the report instead of re-summing per render.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Rows ordered by descending count. Ties break on the extension name
    /// so output stays stable across runs and platforms.
    #[must_use]
    pub fn sorted(&self) -> Vec<(String, u64)> {
        let mut rows: Vec<(String, u64)> = self.counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rows
    }
}

/// Everything a renderer or log writer needs after a scan; nothing
/// downstream ever has to touch the filesystem again.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Root the scan was invoked on, as supplied by the caller.
    pub root: PathBuf,
    pub stats: ExtensionStats,
    /// Sum of all counts in `stats`, computed once when the scan finishes.
    pub total: u64,
    /// Wall-clock duration of the scan.
    pub elapsed: Duration,
    /// Files whose bytes were read successfully.
    pub files_counted: u64,
    /// Files that could not be opened or read; each contributed zero lines.
    pub files_skipped: u64,
    /// Directory subtrees abandoned because enumeration failed mid-walk.
    pub dirs_skipped: u64,
}
