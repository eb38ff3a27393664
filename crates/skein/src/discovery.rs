//! Candidate file discovery
//!
//! Walks the configured source roots and returns every source file's
//! canonical path and raw text. Results are sorted by path so that every
//! downstream tie-break (symbol collisions in particular) is deterministic
//! across platforms and filesystems.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use log::warn;
use walkdir::WalkDir;

/// Recursively collect `(path, text)` pairs under `roots`.
///
/// A root that does not exist, a directory entry that cannot be visited, or
/// a file that cannot be read is logged and skipped; discovery never fails
/// on an individual candidate. Overlapping roots yield each file once.
pub fn discover_files(roots: &[PathBuf], extension: &str) -> Result<Vec<(PathBuf, String)>> {
    let mut found: BTreeMap<PathBuf, String> = BTreeMap::new();

    for root in roots {
        if !root.exists() {
            warn!("source root {} does not exist, skipping", root.display());
            continue;
        }
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable directory entry: {e}");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension() != Some(extension.as_ref()) {
                continue;
            }
            match fs::read_to_string(path) {
                Ok(text) => {
                    found.insert(canonicalize_or_identity(path), text);
                }
                Err(e) => {
                    warn!("skipping unreadable file {}: {e}", path.display());
                }
            }
        }
    }

    Ok(found.into_iter().collect())
}

/// Canonicalize a path, handling errors gracefully
pub(crate) fn canonicalize_or_identity(path: &Path) -> PathBuf {
    match path.canonicalize() {
        Ok(canonical) => canonical,
        Err(e) => {
            warn!("failed to canonicalize path {}: {e}", path.display());
            path.to_path_buf()
        }
    }
}
