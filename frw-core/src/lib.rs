//! lib.rs — Interactive file reader / writer
//! -----------------------------------------------
//! Browse a directory tree, then read a file (paged when large) or open one
//! in an external editor.

/// --- Error handling (unified error type) ---
pub mod error;

/// --- Configuration: TOML settings and reader constants ---
pub mod config;

/// --- Filesystem: scanning, size gate, new-file creation ---
pub mod fs {
    pub mod dir_scanner;
    pub mod file_creator;
    pub mod file_entry;
    pub use file_entry::FileEntry;
    pub mod size_gate;
}

/// --- Prompts and colored output ---
pub mod prompt {
    pub mod console;
    pub use console::{Console, Tone};
    pub mod terminal;
    pub use terminal::TerminalPrompter;
    pub mod traits;
    pub use traits::Prompter;

    #[cfg(test)]
    pub mod scripted;
}

/// --- Paginated reading ---
pub mod reader {
    pub mod paginator;
    pub use paginator::{PaginatedReader, ReadOutcome, ReadSummary};
}

/// --- External editor and write flows ---
pub mod editor {
    pub mod launcher;
    pub use launcher::{CommandEditor, EditorLauncher};
    pub mod write_flow;
}

/// --- Menu routing and file selection ---
pub mod controller {
    pub mod menu;
    pub use menu::{MenuController, MenuOutcome};
    pub mod selector;
}

pub mod logging;
pub use logging::Logger;

pub use error::{CoreError, CoreResult};
