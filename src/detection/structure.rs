//! Top-level project structure listing

use super::DetectionError;
use std::fs;
use std::path::Path;

/// Entries hidden from the listing regardless of the scanner's ignore list
pub const STRUCTURE_NOISE: &[&str] = &[
    ".git",
    ".venv",
    "node_modules",
    "dist",
    "build",
    ".next",
    "__pycache__",
];

/// Maximum number of entries shown before the ellipsis marker
pub const MAX_STRUCTURE_ENTRIES: usize = 30;

pub const ELLIPSIS: &str = "...";

struct Entry {
    name: String,
    is_file: bool,
    is_dir: bool,
}

/// Lists the root's immediate children, directories first, one per line.
///
/// Sorting uses the key `(is_file, lowercase name)`, so directories and other
/// non-file entries come before regular files. Directories carry a trailing
/// `/`.
pub fn project_structure(root: &Path) -> Result<String, DetectionError> {
    let io_err = |source| DetectionError::Io {
        path: root.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for item in fs::read_dir(root).map_err(io_err)? {
        let item = item.map_err(io_err)?;
        let path = item.path();
        entries.push(Entry {
            name: item.file_name().to_string_lossy().into_owned(),
            is_file: path.is_file(),
            is_dir: path.is_dir(),
        });
    }

    entries.sort_by_cached_key(|e| (e.is_file, e.name.to_lowercase()));

    let mut lines = Vec::new();
    for entry in entries {
        if STRUCTURE_NOISE.contains(&entry.name.as_str()) {
            continue;
        }
        if lines.len() >= MAX_STRUCTURE_ENTRIES {
            lines.push(ELLIPSIS.to_string());
            break;
        }
        if entry.is_dir {
            lines.push(format!("{}/", entry.name));
        } else {
            lines.push(entry.name);
        }
    }

    Ok(lines.join("\n"))
}
