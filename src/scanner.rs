// src/scanner.rs
use std::{
    path::Path,
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use rayon::prelude::*;

use crate::{
    counter,
    error::{Result, ScanError},
    stats::{ExtensionStats, ScanReport},
    walker::{self, FileEntry},
};

/// Below this many files the rayon pool costs more than it saves.
const PARALLEL_THRESHOLD: usize = 10;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Worker threads used for enumeration and counting.
    pub jobs: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { jobs: num_cpus::get().max(1) }
    }
}

/// Walks a directory tree and aggregates newline counts per extension.
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    #[must_use]
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Scan the tree rooted at `root` and return the aggregated report.
    ///
    /// Aggregation is commutative, so enumeration order and parallel
    /// interleaving never change the resulting stats. Unreadable files
    /// contribute zero lines and are tallied in `files_skipped`;
    /// directories that fail to enumerate are tallied in `dirs_skipped`.
    /// Neither aborts the scan.
    ///
    /// # Errors
    ///
    /// [`ScanError::InvalidRoot`] when `root` is missing or not a
    /// directory, before any accumulation happens. [`ScanError::ThreadPool`]
    /// when the worker pool cannot be built.
    pub fn scan(&self, root: &Path) -> Result<ScanReport> {
        let started = Instant::now();
        let jobs = self.options.jobs.max(1);

        let enumeration = walker::enumerate(root, jobs)?;
        let candidates = enumeration.files.len() as u64;
        let (stats, files_skipped) = self.aggregate(enumeration.files)?;

        let total = stats.total();
        Ok(ScanReport {
            root: root.to_path_buf(),
            stats,
            total,
            elapsed: started.elapsed(),
            files_counted: candidates - files_skipped,
            files_skipped,
            dirs_skipped: enumeration.dirs_skipped,
        })
    }

    fn aggregate(&self, files: Vec<FileEntry>) -> Result<(ExtensionStats, u64)> {
        if files.len() < PARALLEL_THRESHOLD || self.options.jobs == 1 {
            return Ok(aggregate_sequential(&files));
        }
        self.aggregate_parallel(files)
    }

    fn aggregate_parallel(&self, files: Vec<FileEntry>) -> Result<(ExtensionStats, u64)> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.jobs)
            .build()
            .map_err(|e| ScanError::ThreadPool { details: e.to_string() })?;

        let skipped = AtomicU64::new(0);
        let stats = pool.install(|| {
            files
                .par_iter()
                .fold(ExtensionStats::new, |mut local, entry| {
                    accumulate(&mut local, entry, &skipped);
                    local
                })
                .reduce(ExtensionStats::new, |mut merged, local| {
                    merged.merge(local);
                    merged
                })
        });

        Ok((stats, skipped.load(Ordering::Relaxed)))
    }
}

/// Scan with default options.
///
/// # Errors
///
/// Same failure modes as [`Scanner::scan`].
pub fn scan(root: &Path) -> Result<ScanReport> {
    Scanner::new(ScanOptions::default()).scan(root)
}

fn aggregate_sequential(files: &[FileEntry]) -> (ExtensionStats, u64) {
    let skipped = AtomicU64::new(0);
    let mut stats = ExtensionStats::new();
    for entry in files {
        accumulate(&mut stats, entry, &skipped);
    }
    (stats, skipped.load(Ordering::Relaxed))
}

fn accumulate(stats: &mut ExtensionStats, entry: &FileEntry, skipped: &AtomicU64) {
    match counter::count_newlines(&entry.path) {
        Ok(lines) => stats.add(entry.ext.clone(), lines),
        Err(_) => {
            // Zero-contribution policy: the key still appears, the file
            // adds nothing, and the skip stays observable on the report.
            stats.add(entry.ext.clone(), 0);
            skipped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn scanner(jobs: usize) -> Scanner {
        Scanner::new(ScanOptions { jobs })
    }

    #[test]
    fn aggregates_nested_tree_by_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "1\n2\n3\n").unwrap();
        fs::write(dir.path().join("b.txt"), "1\n2\n3\n4\n5\n").unwrap();
        fs::write(dir.path().join("c.md"), "1\n").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("d.txt"), "1\n2\n").unwrap();

        let report = scanner(1).scan(dir.path()).unwrap();
        assert_eq!(report.stats.get("txt"), Some(10));
        assert_eq!(report.stats.get("md"), Some(1));
        assert_eq!(report.stats.len(), 2);
        assert_eq!(report.total, 11);
        assert_eq!(report.files_counted, 4);
        assert_eq!(report.files_skipped, 0);
    }

    #[test]
    fn extensionless_files_contribute_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("README"), "a\nb\nc\n").unwrap();

        let report = scanner(1).scan(dir.path()).unwrap();
        assert!(report.stats.is_empty());
        assert_eq!(report.total, 0);
        assert_eq!(report.files_counted, 0);
    }

    #[test]
    fn empty_file_keeps_its_extension_key() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("empty.log"), "").unwrap();

        let report = scanner(1).scan(dir.path()).unwrap();
        assert_eq!(report.stats.get("log"), Some(0));
        assert_eq!(report.total, 0);
    }

    #[test]
    fn dotfile_counts_under_its_trailing_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".gitignore"), "target\n*.log\n").unwrap();

        let report = scanner(1).scan(dir.path()).unwrap();
        assert_eq!(report.stats.get("gitignore"), Some(2));
    }

    #[test]
    fn trailing_dot_yields_empty_extension_key() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("name."), "x\n").unwrap();

        let report = scanner(1).scan(dir.path()).unwrap();
        assert_eq!(report.stats.get(""), Some(1));
    }

    #[test]
    fn invalid_root_fails_before_scanning() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x\n").unwrap();

        assert!(matches!(
            scanner(1).scan(&file),
            Err(ScanError::InvalidRoot { .. })
        ));
        assert!(matches!(
            scanner(1).scan(&dir.path().join("absent")),
            Err(ScanError::InvalidRoot { .. })
        ));
    }

    #[test]
    fn rescan_of_unmodified_tree_is_identical() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "fn main() {}\n").unwrap();
        fs::write(dir.path().join("b.md"), "# title\n\nbody\n").unwrap();

        let first = scanner(1).scan(dir.path()).unwrap();
        let second = scanner(1).scan(dir.path()).unwrap();
        assert_eq!(first.stats, second.stats);
        assert_eq!(first.total, second.total);
    }

    #[test]
    fn parallel_scan_matches_sequential() {
        let dir = tempdir().unwrap();
        for i in 0..40 {
            let lines = "l\n".repeat(i % 7);
            fs::write(dir.path().join(format!("f{i}.txt")), &lines).unwrap();
            fs::write(dir.path().join(format!("g{i}.rs")), &lines).unwrap();
        }

        let sequential = scanner(1).scan(dir.path()).unwrap();
        let parallel = scanner(4).scan(dir.path()).unwrap();
        assert_eq!(sequential.stats, parallel.stats);
        assert_eq!(sequential.total, parallel.total);
        assert_eq!(sequential.files_counted, parallel.files_counted);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_skipped_not_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("ok.txt"), "a\nb\n").unwrap();
        let locked = dir.path().join("locked.txt");
        fs::write(&locked, "c\nd\ne\n").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::File::open(&locked).is_ok() {
            // Permission bits don't bind root; nothing to assert here.
            return;
        }

        let report = scanner(1).scan(dir.path()).unwrap();
        // Restore so the tempdir can be cleaned up.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

        assert_eq!(report.stats.get("txt"), Some(2));
        assert_eq!(report.files_skipped, 1);
        assert_eq!(report.files_counted, 1);
    }
}
