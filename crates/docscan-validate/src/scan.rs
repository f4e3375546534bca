//! Source file discovery.

use crate::config::FilesConfig;
use crate::{Result, ScanError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Eligible source files under `root`, sorted by path.
///
/// Dependency-cache directories are pruned before descending. Exclude
/// globs match paths relative to `root`.
pub fn discover_files(root: &Path, files: &FilesConfig) -> Result<Vec<PathBuf>> {
    let excludes = files.exclude_set()?;
    let mut found = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !files.is_skipped_dir(&e.file_name().to_string_lossy())
        });
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                return Err(ScanError::io(root, source));
            }
            Err(err) => {
                tracing::warn!(error = %err, "Skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !files.is_eligible_file(entry.path()) {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if excludes.is_match(relative) {
            tracing::debug!(path = %entry.path().display(), "Excluded by glob");
            continue;
        }
        found.push(entry.into_path());
    }

    found.sort();
    Ok(found)
}
