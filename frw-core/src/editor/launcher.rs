//! External editor invocation.

use std::path::Path;

use async_trait::async_trait;
use compact_str::CompactString;
use tokio::process::Command;
use tracing::info;

use crate::error::{CoreError, CoreResult};

/// How the editor process ended. Not interpreted by the flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorExit {
    /// `None` when terminated by a signal.
    pub code: Option<i32>,
}

#[async_trait]
pub trait EditorLauncher: Send + Sync {
    /// Opens `path` and waits for the editor to exit.
    async fn launch(&self, path: &Path) -> CoreResult<EditorExit>;
}

/// Runs a configured command line, e.g. `nano` or `code --wait`, with the
/// target path appended. The child inherits the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEditor {
    program: CompactString,
    args: Vec<String>,
}

impl CommandEditor {
    pub fn from_command_line(cmd: &str) -> CoreResult<Self> {
        let mut parts = cmd.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| CoreError::command_unavailable(cmd))?;

        Ok(Self {
            program: CompactString::new(program),
            args: parts.map(str::to_string).collect(),
        })
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl EditorLauncher for CommandEditor {
    async fn launch(&self, path: &Path) -> CoreResult<EditorExit> {
        info!("Launching {} {:?} on {}", self.program, self.args, path.display());

        let status = Command::new(self.program.as_str())
            .args(&self.args)
            .arg(path)
            .status()
            .await
            .map_err(|e| CoreError::process_spawn(&self.program, e))?;

        info!("Editor exited with {:?}", status.code());
        Ok(EditorExit { code: status.code() })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_split() {
        let editor = CommandEditor::from_command_line("code  --wait -n").unwrap();

        assert_eq!(editor.program(), "code");
        assert_eq!(editor.args(), ["--wait", "-n"]);
    }

    #[test]
    fn test_blank_command_is_unavailable() {
        assert!(matches!(
            CommandEditor::from_command_line("   "),
            Err(CoreError::CommandUnavailable { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_reports_exit_code_without_judging_it() {
        let ok = CommandEditor::from_command_line("true").unwrap();
        let bad = CommandEditor::from_command_line("false").unwrap();

        assert_eq!(ok.launch(Path::new("x")).await.unwrap().code, Some(0));
        assert_eq!(bad.launch(Path::new("x")).await.unwrap().code, Some(1));
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let editor = CommandEditor::from_command_line("frw-no-such-editor-binary").unwrap();

        let result = editor.launch(Path::new("x")).await;

        assert!(matches!(result, Err(CoreError::ProcessSpawn { .. })));
    }
}
