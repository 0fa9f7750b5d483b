//! New-file naming and creation.
//!
//! Every file made here ends in [`NEW_FILE_EXTENSION`]: whatever the user typed
//! loses its dots, then the fixed extension is appended.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::NEW_FILE_EXTENSION;
use crate::error::{CoreError, CoreResult};

/// `"notes.md"` → `"notesmd.txt"`, `" todo "` → `"todo.txt"`.
pub fn normalize_file_name(raw: &str) -> CoreResult<String> {
    let stem: String = raw.trim().chars().filter(|c| *c != '.').collect();

    if stem.is_empty() {
        return Err(CoreError::invalid_input("filename", "name is empty"));
    }

    if stem.contains(['/', '\\']) {
        return Err(CoreError::invalid_input(
            "filename",
            "name must not contain path separators",
        ));
    }

    Ok(format!("{stem}.{NEW_FILE_EXTENSION}"))
}

/// Relative destinations hang off `base_dir`; an empty answer means `base_dir`.
#[must_use]
pub fn resolve_destination(base_dir: &Path, dir_input: &str, file_name: &str) -> PathBuf {
    let dir = dir_input.trim();

    let dir_path: PathBuf = if dir.is_empty() {
        base_dir.to_path_buf()
    } else if Path::new(dir).is_absolute() {
        PathBuf::from(dir)
    } else {
        base_dir.join(dir)
    };

    dir_path.join(file_name)
}

/// Creates an empty file at `path`. Existing files are left untouched and
/// reported as a creation failure.
pub fn create_empty(path: &Path) -> CoreResult<()> {
    debug!("Creating empty file {}", path.display());

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| CoreError::file_create(path, &e))?;

    info!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_strips_dots_and_forces_txt() {
        assert_eq!(normalize_file_name("notes").unwrap(), "notes.txt");
        assert_eq!(normalize_file_name("notes.md").unwrap(), "notesmd.txt");
        assert_eq!(normalize_file_name("a.b.c").unwrap(), "abc.txt");
        assert_eq!(normalize_file_name("  draft  ").unwrap(), "draft.txt");
    }

    #[test]
    fn test_normalize_rejects_empty_and_separators() {
        assert!(matches!(
            normalize_file_name("..."),
            Err(CoreError::InvalidInput { .. })
        ));
        assert!(matches!(
            normalize_file_name("   "),
            Err(CoreError::InvalidInput { .. })
        ));
        assert!(matches!(
            normalize_file_name("sub/name"),
            Err(CoreError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_resolve_destination_relative_and_absolute() {
        let base = Path::new("/work");

        assert_eq!(
            resolve_destination(base, "util", "x.txt"),
            PathBuf::from("/work/util/x.txt")
        );
        assert_eq!(
            resolve_destination(base, "/tmp/out", "x.txt"),
            PathBuf::from("/tmp/out/x.txt")
        );
        assert_eq!(resolve_destination(base, "  ", "x.txt"), PathBuf::from("/work/x.txt"));
    }

    #[test]
    fn test_create_empty_then_refuse_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fresh.txt");

        create_empty(&path).unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);

        std::fs::write(&path, "keep me").unwrap();
        assert!(matches!(create_empty(&path), Err(CoreError::FileCreate { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no/such/dir/f.txt");

        assert!(matches!(create_empty(&path), Err(CoreError::FileCreate { .. })));
    }
}
