//! Full-dump vs. chunked-read decision.

use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// Inclusive: a file of exactly `threshold` bytes is paged.
#[inline]
#[must_use]
pub const fn exceeds_len(len: u64, threshold: u64) -> bool {
    len >= threshold
}

/// Path-level entry point: stats `path` and applies [`exceeds_len`].
pub fn exceeds(path: &Path, threshold: u64) -> CoreResult<bool> {
    let meta = std::fs::metadata(path).map_err(|e| CoreError::io_at(path, e))?;

    Ok(exceeds_len(meta.len(), threshold))
}
