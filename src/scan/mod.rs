//! File scanner
//!
//! Walks a project tree and yields a [`FileRecord`] for every text-like file:
//! a bounded, permissively decoded preview plus a SHA-256 fingerprint of the
//! bytes that were read. Files that cannot be read are skipped and logged at
//! debug level; the scan itself never fails.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, FilterEntry, WalkDir};

/// Default per-file byte cap for previews
pub const DEFAULT_MAX_PREVIEW_BYTES: usize = 4096;

/// Directory names that are never descended into
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".venv",
    "dist",
    "build",
    ".next",
    "__pycache__",
    "target",
    "Pods",
    "vendor",
    "coverage",
    ".pytest_cache",
    ".idea",
    ".vscode",
];

/// Extensions (lowercase, without the dot) treated as binary content
pub const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "webp", "gif", "ico", "pdf", "zip", "gz", "7z", "mp4", "mov", "avi",
    "ogg", "wasm", "exe", "dll", "bin",
];

/// A scanned text file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Path relative to the scan root, `/`-separated
    pub path: String,
    /// Number of bytes read (never more than the cap)
    pub byte_length: usize,
    /// Hex-encoded SHA-256 of the bytes read
    pub content_hash: String,
    /// Lossy UTF-8 decoding of the bytes read
    pub preview: String,
}

/// Returns true if `name` is one of [`IGNORED_DIRS`]
pub fn is_ignored_dir(name: &str) -> bool {
    IGNORED_DIRS.contains(&name)
}

/// Returns true if any component of `relative`, file name included, is ignored
pub fn has_ignored_segment(relative: &Path) -> bool {
    relative
        .components()
        .any(|c| c.as_os_str().to_str().map(is_ignored_dir).unwrap_or(false))
}

/// Returns true if the path's extension is one of [`BINARY_EXTENSIONS`]
pub fn is_binary_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| BINARY_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Renders a relative path with `/` separators regardless of platform
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Scanner over a single root directory
#[derive(Debug, Clone)]
pub struct FileScanner {
    root: PathBuf,
    max_bytes: usize,
}

impl FileScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_bytes: DEFAULT_MAX_PREVIEW_BYTES,
        }
    }

    /// Overrides the per-file byte cap
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Starts a new lazy walk. Each call re-reads the tree from scratch.
    pub fn scan(&self) -> ScanIter {
        debug!(
            root = %self.root.display(),
            max_bytes = self.max_bytes,
            "Starting file scan"
        );

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(keep_entry as fn(&DirEntry) -> bool);

        ScanIter {
            root: self.root.clone(),
            max_bytes: self.max_bytes,
            walker,
        }
    }
}

fn keep_entry(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    !entry
        .file_name()
        .to_str()
        .map(is_ignored_dir)
        .unwrap_or(false)
}

/// Lazy sequence of [`FileRecord`]s produced by [`FileScanner::scan`]
pub struct ScanIter {
    root: PathBuf,
    max_bytes: usize,
    walker: FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
}

impl Iterator for ScanIter {
    type Item = FileRecord;

    fn next(&mut self) -> Option<FileRecord> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(error = %err, "Skipping unreadable directory entry");
                    continue;
                }
            };

            let path = entry.path();
            // Follows symlinks, so a link to a regular file still counts
            if !path.is_file() {
                continue;
            }

            let Ok(relative) = path.strip_prefix(&self.root) else {
                continue;
            };

            if has_ignored_segment(relative) || is_binary_path(relative) {
                continue;
            }

            match read_record(path, relative, self.max_bytes) {
                Ok(record) => return Some(record),
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "Skipping unreadable file");
                }
            }
        }
    }
}

impl std::fmt::Debug for ScanIter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanIter")
            .field("root", &self.root)
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}

fn read_record(path: &Path, relative: &Path, max_bytes: usize) -> io::Result<FileRecord> {
    let file = File::open(path)?;
    let mut data = Vec::with_capacity(max_bytes.min(64 * 1024));
    file.take(max_bytes as u64).read_to_end(&mut data)?;

    Ok(FileRecord {
        path: to_slash_path(relative),
        byte_length: data.len(),
        content_hash: hex::encode(Sha256::digest(&data)),
        preview: String::from_utf8_lossy(&data).into_owned(),
    })
}
