//! File Selector: scan, list, pick.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::fs::dir_scanner::scan_files;
use crate::fs::file_entry::FileEntry;
use crate::prompt::traits::Prompter;

/// Lists every file under `root` and returns the absolute path the user picks.
///
/// Fails with [`CoreError::EmptyDirectory`] before prompting when there is
/// nothing to pick, and with [`CoreError::Cancelled`] when the prompt is aborted.
pub fn select_file<P: Prompter + ?Sized>(
    prompter: &mut P,
    message: &str,
    root: &Path,
) -> CoreResult<PathBuf> {
    let entries: Vec<FileEntry> = scan_files(root)?;

    if entries.is_empty() {
        return Err(CoreError::empty_directory(root));
    }

    let labels: Vec<String> = entries.iter().map(ToString::to_string).collect();
    let idx = prompter.select(message, &labels)?;

    let picked = entries
        .into_iter()
        .nth(idx)
        .ok_or_else(|| CoreError::invalid_input("choice", "selection out of range"))?;

    debug!("Selected {}", picked.path.display());
    Ok(picked.path)
}
