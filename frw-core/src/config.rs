//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! User-editable settings live in a TOML file under the platform config dir
//! discovered through [`directories`](https://docs.rs/directories). Reading
//! behavior (size threshold, chunk size) is not part of that file: it is fixed
//! at compile time and handed to the reader as an explicit [`ReaderConfig`].
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load().await?;
//! config.save().await?;
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::error::CoreResult;

use tokio::fs as TokioFs;

/// Files at or above this many bytes are read in chunks.
pub const FILE_SIZE_THRESHOLD: u64 = 1024 * 100;

/// Lines shown per chunk before asking to continue.
pub const CHUNK_SIZE: usize = 5;

/// Input that stops pagination.
pub const CANCEL_TOKEN: &str = "n";

/// Extension forced onto every newly created file.
pub const NEW_FILE_EXTENSION: &str = "txt";

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "frw";
const APPLICATION: &str = "FileReaderWriter";

/// Paginated reader settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    pub threshold_bytes: u64,

    pub chunk_size: usize,

    /// Print the final partial chunk at EOF instead of dropping it.
    pub flush_remainder: bool,

    pub cancel_token: &'static str,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            threshold_bytes: FILE_SIZE_THRESHOLD,
            chunk_size: CHUNK_SIZE,
            flush_remainder: true,
            cancel_token: CANCEL_TOKEN,
        }
    }
}

impl ReaderConfig {
    #[must_use]
    pub const fn with_threshold(mut self, threshold_bytes: u64) -> Self {
        self.threshold_bytes = threshold_bytes;
        self
    }

    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    #[must_use]
    pub const fn with_flush_remainder(mut self, flush_remainder: bool) -> Self {
        self.flush_remainder = flush_remainder;
        self
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editor command line; the target path is appended as the last argument.
    pub editor_cmd: String,

    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editor_cmd: "nano".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads config from TOML file at the XDG-compliant app config dir, or returns defaults.
    ///
    /// The config is expected at `$XDG_CONFIG_HOME/FileReaderWriter/config.toml`
    /// (Linux), or equivalent on Windows/macOS.
    pub async fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            info!("Loading config from {}", path.display());
            let text = TokioFs::read_to_string(&path).await?;

            Ok(Self::from_toml(&text)?)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save().await?;

            Ok(default_config)
        }
    }

    /// Saves config to TOML file at the XDG-compliant app config dir.
    pub async fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;

        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent).await?;
        }

        TokioFs::write(&path, self.to_toml()?).await?;

        Ok(())
    }

    /// Malformed text surfaces as [`CoreError::Config`].
    pub fn from_toml(text: &str) -> CoreResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> CoreResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory for rolling log files, kept outside the scanned tree.
    pub fn log_dir() -> anyhow::Result<PathBuf> {
        Ok(Self::project_dirs()?.data_local_dir().join("logs"))
    }

    fn project_dirs() -> anyhow::Result<ProjectDirs> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))
    }
}
