// src/walker.rs
use std::{
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use ignore::{WalkBuilder, WalkState};

use crate::error::{Result, ScanError};

/// A leaf file discovered during enumeration, tagged with its extension.
/// Ephemeral: produced here, consumed by the scanner, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub ext: String,
}

/// Outcome of a tree walk: the entries to count plus the number of
/// subtrees that had to be abandoned mid-walk.
#[derive(Debug, Default)]
pub struct Enumeration {
    pub files: Vec<FileEntry>,
    pub dirs_skipped: u64,
}

/// Extension of a file name: the substring after the last `.`, case
/// preserved, no leading dot.
///
/// A name without a dot has no extension and is excluded from aggregation
/// entirely. A leading dot participates like any other, so `.gitignore`
/// yields `gitignore`; `name.` yields the empty string, a valid key.
#[must_use]
pub fn extension_of(name: &str) -> Option<&str> {
    name.rfind('.').map(|pos| &name[pos + 1..])
}

/// Enumerate every leaf file with an extension under `root`.
///
/// All entries reachable from the root are visited: hidden files are
/// included and no ignore-file semantics apply. Symlinks and other
/// non-regular entries surface as leaf files; whether their bytes can be
/// read is decided later by the counter. Directories that fail to
/// enumerate are skipped and counted, never fatal.
///
/// # Errors
///
/// Fails fast with [`ScanError::InvalidRoot`] when `root` is missing or
/// not a directory.
pub fn enumerate(root: &Path, threads: usize) -> Result<Enumeration> {
    let is_dir = std::fs::metadata(root).map(|meta| meta.is_dir()).unwrap_or(false);
    if !is_dir {
        return Err(ScanError::InvalidRoot { path: root.to_path_buf() });
    }

    if threads > 1 {
        Ok(enumerate_parallel(root, threads))
    } else {
        Ok(enumerate_sequential(root))
    }
}

fn build_walker(root: &Path, threads: usize) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    // The scan counts everything reachable: keep hidden entries and drop
    // all gitignore-style filtering.
    builder.standard_filters(false);
    builder.follow_links(false);
    builder.threads(threads);
    builder
}

fn leaf_entry(path: PathBuf) -> Option<FileEntry> {
    let name = path.file_name()?.to_string_lossy().into_owned();
    let ext = extension_of(&name)?.to_owned();
    Some(FileEntry { path, ext })
}

fn enumerate_sequential(root: &Path) -> Enumeration {
    let mut out = Enumeration::default();
    for result in build_walker(root, 1).build() {
        match result {
            Ok(entry) => {
                // Anything that is not a directory is a leaf file here,
                // symlinks and special files included.
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    continue;
                }
                if let Some(file) = leaf_entry(entry.into_path()) {
                    out.files.push(file);
                }
            }
            Err(_) => out.dirs_skipped += 1,
        }
    }
    out
}

// Shared threshold for flushing per-thread collectors.
const FLUSH_THRESHOLD: usize = 64;

// Per-thread buffer that batches appends into the shared vector to reduce
// mutex contention during parallel walks. Leftovers flush on drop when the
// worker thread finishes.
struct LocalCollector {
    buf: Vec<FileEntry>,
    shared: Arc<Mutex<Vec<FileEntry>>>,
}

impl LocalCollector {
    fn new(shared: Arc<Mutex<Vec<FileEntry>>>) -> Self {
        Self { buf: Vec::with_capacity(FLUSH_THRESHOLD), shared }
    }
}

impl Drop for LocalCollector {
    fn drop(&mut self) {
        if !self.buf.is_empty() {
            let mut guard = self.shared.lock().unwrap();
            guard.append(&mut self.buf);
        }
    }
}

fn enumerate_parallel(root: &Path, threads: usize) -> Enumeration {
    let shared: Arc<Mutex<Vec<FileEntry>>> = Arc::new(Mutex::new(Vec::new()));
    let dirs_skipped = Arc::new(AtomicU64::new(0));

    build_walker(root, threads).build_parallel().run(|| {
        let mut collector = LocalCollector::new(Arc::clone(&shared));
        let skipped = Arc::clone(&dirs_skipped);
        Box::new(move |result| {
            match result {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                        return WalkState::Continue;
                    }
                    if let Some(file) = leaf_entry(entry.into_path()) {
                        collector.buf.push(file);
                        if collector.buf.len() >= FLUSH_THRESHOLD {
                            let mut guard = collector.shared.lock().unwrap();
                            guard.append(&mut collector.buf);
                        }
                    }
                }
                Err(_) => {
                    skipped.fetch_add(1, Ordering::Relaxed);
                }
            }
            WalkState::Continue
        })
    });

    let mut guard = shared.lock().unwrap();
    let mut files = Vec::new();
    files.append(&mut guard);
    drop(guard);

    Enumeration { files, dirs_skipped: dirs_skipped.load(Ordering::Relaxed) }
}
