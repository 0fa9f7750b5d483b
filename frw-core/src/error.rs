//! Core error handling module
//!
//! • One enum for every failure the reader/writer flows can surface
//! • `CompactString` payloads keep variants small
//! • First-class `tracing` integration through [`CoreError::trace`]
//! • `#[non_exhaustive]` for forward-compatible extension
use std::io::{self, ErrorKind};
use std::path::Path;

use compact_str::CompactString;
use smallvec::{SmallVec, smallvec};
use thiserror::Error;
use tracing::{Level, event};

/// Convenient alias carrying our unified error type
pub type CoreResult<T> = Result<T, CoreError>;

/// Primary error enumeration (grouped by concern)
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CoreError {
    // ────────────────────────────────────────────────────────────
    // Input validation
    // ────────────────────────────────────────────────────────────
    #[error("Invalid input: {field} - {message}")]
    InvalidInput {
        field:   CompactString,
        message: CompactString,
    },

    /// The user backed out of a prompt.
    #[error("Operation was cancelled")]
    Cancelled,

    // ────────────────────────────────────────────────────────────
    // Path-related failures
    // ────────────────────────────────────────────────────────────
    #[error("Path not found: {0}")]
    PathNotFound(CompactString),

    #[error("Path access denied: {0}")]
    PathAccessDenied(CompactString),

    #[error("No files found under {root}")]
    EmptyDirectory {
        root: CompactString,
    },

    // ────────────────────────────────────────────────────────────
    // File-system
    // ────────────────────────────────────────────────────────────
    #[error("FS operation failed on {path}: {kind:?}")]
    FileSystem {
        path:   CompactString,
        kind:   ErrorKind,
        #[source]
        source: Box<io::Error>,
    },

    #[error("Could not create {path}: {kind:?}")]
    FileCreate {
        path: CompactString,
        kind: ErrorKind,
    },

    // ────────────────────────────────────────────────────────────
    // External editor
    // ────────────────────────────────────────────────────────────
    #[error("Command unavailable: {command}")]
    CommandUnavailable {
        command: CompactString,
    },

    #[error("Process spawn error: {command}")]
    ProcessSpawn {
        command: CompactString,

        #[source]
        source: Box<io::Error>,
    },

    // ────────────────────────────────────────────────────────────
    // Terminal / configuration
    // ────────────────────────────────────────────────────────────
    #[error("Terminal error: {0}")]
    Terminal(CompactString),

    #[error("Config error: {0}")]
    Config(CompactString),
}

// ────────────────────────────────────────────────────────────────────────────
// Fast classification helpers
// ────────────────────────────────────────────────────────────────────────────
impl CoreError {
    /// Determine whether the interactive flow may safely carry on
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !self.is_fatal()
            && matches!(
                self, Self::InvalidInput { .. }
                | Self::FileCreate { .. }
                | Self::Cancelled
            )
    }

    /// Permission failures end the run; everything else is reported and swallowed.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self, Self::PathAccessDenied(_)
            | Self::FileSystem {
                kind: ErrorKind::PermissionDenied,
                ..
            }
            | Self::FileCreate {
                kind: ErrorKind::PermissionDenied,
                ..
            })
    }

    #[inline]
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    // ────────────────────────────────────────────────────────────
    // Attribute helpers – used for log grouping
    // ────────────────────────────────────────────────────────────
    #[inline]
    #[must_use]
    pub const fn operation_type(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } |
                    Self::Cancelled                         => "user_input",

            Self::PathNotFound(_) |
                    Self::PathAccessDenied(_) |
                    Self::EmptyDirectory { .. }             => "path_access",

            Self::FileSystem { .. } |
                    Self::FileCreate { .. }                 => "file_system",

            Self::CommandUnavailable { .. } |
                    Self::ProcessSpawn { .. }               => "process_spawn",

            Self::Terminal(_)                               => "terminal",

            Self::Config(_)                                 => "config",
        }
    }

    // ────────────────────────────────────────────────────────────
    // Structured-field extraction (SmallVec avoids heap ≤4 items)
    // ────────────────────────────────────────────────────────────
    #[inline]
    #[must_use]
    pub fn extract_trace_fields(
        &self,
    ) -> SmallVec<[(&'static str, CompactString); 4]> {
        match self {
            Self::InvalidInput { field, message } => smallvec![
                ("field",   field.clone()),
                ("message", message.clone()),
            ],

            Self::FileSystem { path, kind, .. } | Self::FileCreate { path, kind } => smallvec![
                ("path",       path.clone()),
                ("error_kind", CompactString::from(format!("{kind:?}"))),
            ],

            Self::PathNotFound(path) | Self::PathAccessDenied(path) => smallvec![
                ("path", path.clone()),
            ],

            Self::EmptyDirectory { root } => smallvec![
                ("root", root.clone()),
            ],

            Self::CommandUnavailable { command } | Self::ProcessSpawn { command, .. } => smallvec![
                ("command", command.clone()),
            ],

            _ => smallvec![],
        }
    }

    // ────────────────────────────────────────────────────────────
    // Single-call log emission
    // ────────────────────────────────────────────────────────────
    #[must_use]
    pub fn trace(self) -> Self {
        let extra: SmallVec<[(&'static str, CompactString); 4]> = self.extract_trace_fields();

        event!(
            Level::ERROR,
            marker       = self.error_marker(),
            op_type      = self.operation_type(),
            error        = %self,
            recoverable  = self.is_recoverable(),
            fatal        = self.is_fatal(),
            extra        = ?extra,
        );

        self
    }

    // ────────────────────────────────────────────────────────────
    // Lightweight smart-constructors
    // ────────────────────────────────────────────────────────────
    #[inline]
    #[must_use]
    pub fn invalid_input(field: &str, message: &str) -> Self
    {
        Self::InvalidInput
        {
            field:   CompactString::new(field),
            message: CompactString::new(message),
        }
    }

    #[inline]
    #[must_use]
    pub fn empty_directory(root: &Path) -> Self
    {
        Self::EmptyDirectory
        {
            root: CompactString::from(root.to_string_lossy()),
        }
    }

    #[inline]
    #[must_use]
    pub fn command_unavailable(command: &str) -> Self
    {
        Self::CommandUnavailable
        {
            command: CompactString::new(command),
        }
    }

    #[inline]
    #[must_use]
    pub fn process_spawn(command: &str, e: io::Error) -> Self
    {
        Self::ProcessSpawn {
            command: CompactString::new(command),
            source: Box::new(e),
        }
    }

    #[inline]
    #[must_use]
    pub fn file_create(path: &Path, e: &io::Error) -> Self
    {
        Self::FileCreate {
            path: CompactString::from(path.to_string_lossy()),
            kind: e.kind(),
        }
    }

    #[inline]
    #[must_use]
    pub fn terminal(e: &io::Error) -> Self
    {
        Self::Terminal(CompactString::from(e.to_string()))
    }

    /// Map an IO failure on `path` onto the matching path variant.
    #[must_use]
    pub fn io_at(path: &Path, e: io::Error) -> Self
    {
        let shown = CompactString::from(path.to_string_lossy());

        match e.kind() {
            ErrorKind::NotFound         => Self::PathNotFound(shown),

            ErrorKind::PermissionDenied => Self::PathAccessDenied(shown),

            kind                        => Self::FileSystem {
                path: shown,
                kind,
                source: Box::new(e),
            },
        }
    }

    // ────────────────────────────────────────────────────────────
    // Internal marker generator – keeps log keys stable
    // ────────────────────────────────────────────────────────────
    #[inline]
    #[must_use]
    const fn error_marker(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. }        => "ERROR_INPUT_VALIDATION",

            Self::Cancelled                  => "ERROR_CANCELLED",

            Self::PathNotFound(_)            => "ERROR_PATH_NOT_FOUND",

            Self::PathAccessDenied(_)        => "ERROR_PATH_ACCESS_DENIED",

            Self::EmptyDirectory { .. }      => "ERROR_EMPTY_DIRECTORY",

            Self::FileSystem { .. }          => "ERROR_FILE_SYSTEM",

            Self::FileCreate { .. }          => "ERROR_FILE_CREATE",

            Self::CommandUnavailable { .. }  => "ERROR_COMMAND_UNAVAILABLE",

            Self::ProcessSpawn { .. }        => "ERROR_PROCESS_SPAWN",

            Self::Terminal(_)                => "ERROR_TERMINAL",

            Self::Config(_)                  => "ERROR_CONFIG",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Mapping from std::io::Error when no path is at hand
// ────────────────────────────────────────────────────────────────────────────
impl From<io::Error> for CoreError {
    fn from(err: io::Error) -> Self {
        Self::FileSystem {
            path:   CompactString::const_new("<unknown>"),
            kind:   err.kind(),
            source: Box::new(err),
        }
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(CompactString::from(err.to_string()))
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(CompactString::from(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_io_at_maps_kinds_to_path_variants() {
        let path = PathBuf::from("/tmp/nowhere");

        let not_found = CoreError::io_at(&path, io::Error::from(ErrorKind::NotFound));
        assert!(matches!(not_found, CoreError::PathNotFound(_)));

        let denied = CoreError::io_at(&path, io::Error::from(ErrorKind::PermissionDenied));
        assert!(matches!(denied, CoreError::PathAccessDenied(_)));
        assert!(denied.is_fatal());

        let other = CoreError::io_at(&path, io::Error::from(ErrorKind::InvalidData));
        assert!(matches!(other, CoreError::FileSystem { kind: ErrorKind::InvalidData, .. }));
        assert!(!other.is_fatal());
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(CoreError::Cancelled.is_recoverable());
        assert!(CoreError::invalid_input("filename", "empty").is_recoverable());
        assert!(!CoreError::empty_directory(Path::new("/srv")).is_recoverable());
    }

    #[test]
    fn test_denied_creation_is_fatal_not_retried() {
        let denied =
            CoreError::file_create(Path::new("/root/x.txt"), &io::Error::from(ErrorKind::PermissionDenied));
        assert!(denied.is_fatal());
        assert!(!denied.is_recoverable());

        let missing_dir =
            CoreError::file_create(Path::new("/nope/x.txt"), &io::Error::from(ErrorKind::NotFound));
        assert!(!missing_dir.is_fatal());
        assert!(missing_dir.is_recoverable());
    }

    #[test]
    fn test_toml_errors_become_config_errors() {
        let err: CoreError = toml::from_str::<toml::Table>("editor_cmd = ").unwrap_err().into();

        assert!(matches!(err, CoreError::Config(_)));
        assert_eq!(err.operation_type(), "config");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_trace_fields_carry_path() {
        let err = CoreError::file_create(Path::new("/a/b.txt"), &io::Error::from(ErrorKind::NotFound));
        let fields = err.extract_trace_fields();

        assert_eq!(fields[0], ("path", CompactString::new("/a/b.txt")));
        assert_eq!(err.operation_type(), "file_system");
    }
}
