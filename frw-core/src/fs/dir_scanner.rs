//! ``src/fs/dir_scanner.rs``
//!
//! # `Directory Scanner`: Recursive File Listing
//!
//! Walks a root directory to any depth and returns one [`FileEntry`] per
//! regular file, in traversal order.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{CoreError, CoreResult};
use crate::fs::file_entry::FileEntry;

/// Scans `root` recursively and returns every regular file below it.
///
/// Symlinks are not followed. Entries that cannot be read below the root are
/// logged and skipped; a root that cannot be read is an error.
pub fn scan_files(root: &Path) -> CoreResult<Vec<FileEntry>> {
    let start_time = Instant::now();

    // Surface root failures before walking so the error names the root.
    std::fs::read_dir(root).map_err(|e| CoreError::io_at(root, e))?;

    let mut entries: Vec<FileEntry> = Vec::new();

    for entry_result in WalkDir::new(root).min_depth(1) {
        let entry: DirEntry = match entry_result {
            Ok(e) => e,

            Err(e) => {
                warn!(
                    "Skipping unreadable entry {:?}: {}",
                    e.path().map(Path::to_path_buf),
                    e
                );
                continue;
            }
        };

        if entry.file_type().is_file() {
            entries.push(FileEntry::new(entry.into_path()));
        }
    }

    let duration: Duration = start_time.elapsed();
    info!(
        marker = "DIRECTORY_SCAN",
        operation_type = "scan_files",
        files = entries.len(),
        "Scanned {} in {:?}",
        root.display(),
        duration
    );

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path();

        File::create(path.join("top.txt")).unwrap();
        fs::create_dir_all(path.join("a/b/c")).unwrap();
        File::create(path.join("a/one.md")).unwrap();
        File::create(path.join("a/b/two.rs")).unwrap();
        File::create(path.join("a/b/c/three")).unwrap();
        fs::create_dir(path.join("empty")).unwrap();

        temp_dir
    }

    #[test]
    fn test_scan_finds_every_nested_file() {
        let temp_dir = create_test_tree();

        let entries = scan_files(temp_dir.path()).unwrap();

        assert_eq!(entries.len(), 4);
        for entry in &entries {
            assert!(entry.path.exists());
            assert_eq!(
                entry.display_name.as_str(),
                entry.path.file_name().unwrap().to_str().unwrap()
            );
        }

        let mut names: Vec<&str> = entries.iter().map(|e| e.display_name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, ["one.md", "three", "top.txt", "two.rs"]);
    }

    #[test]
    fn test_scan_empty_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("only_dirs")).unwrap();

        let entries = scan_files(temp_dir.path()).unwrap();

        assert!(entries.is_empty());
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone");

        let result = scan_files(&missing);

        assert!(matches!(result, Err(CoreError::PathNotFound(_))));
    }
}
