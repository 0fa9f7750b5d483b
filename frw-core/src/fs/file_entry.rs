//! `src/fs/file_entry.rs`
//! ============================================================
//! One discovered regular file, as shown in the selection list.

use std::fmt;
use std::path::{Path, PathBuf};

use compact_str::CompactString;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    // Absolute path handed back to callers on selection
    pub path: PathBuf,

    // Basename used when rendering the list
    pub display_name: CompactString,
}

impl FileEntry {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let display_name = Self::name_of(&path);

        Self { path, display_name }
    }

    /// Basename of `path`, or the whole path when it has none (e.g. `/`).
    #[must_use]
    pub fn name_of(path: &Path) -> CompactString {
        path.file_name()
            .map_or_else(
                || CompactString::from(path.to_string_lossy()),
                |n| CompactString::from(n.to_string_lossy()),
            )
    }
}

// Choice-list label: `name - /abs/path`
impl fmt::Display for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.display_name, self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_is_basename() {
        let entry = FileEntry::new(PathBuf::from("/srv/notes/todo.txt"));

        assert_eq!(entry.display_name.as_str(), "todo.txt");
        assert_eq!(entry.to_string(), "todo.txt - /srv/notes/todo.txt");
    }
}
