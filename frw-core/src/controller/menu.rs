//! src/controller/menu.rs
//! ============================================================================
//! # Menu Controller
//!
//! Two-level routing: read vs. write, then (for write) new file vs. edit
//! existing. One pass per run; nothing is kept after the chosen flow returns.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::controller::selector::select_file;
use crate::editor::{
    launcher::{EditorExit, EditorLauncher},
    write_flow::{create_and_edit, edit_existing},
};
use crate::error::{CoreError, CoreResult};
use crate::prompt::{
    console::{Console, Tone},
    traits::Prompter,
};
use crate::reader::paginator::{PaginatedReader, ReadSummary};

const MAIN_QUESTION: &str = "What are you trying to do?";
const WRITE_QUESTION: &str = "Would you like to edit a file or write a new one? (only .txt files are supported when writing a new one)";
const READ_QUESTION: &str = "What file do you want to read from?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Write,
    Read,
}

impl MainChoice {
    pub const ALL: [Self; 2] = [Self::Write, Self::Read];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Write => "Write into a file",
            Self::Read => {
                "Read from a file (if too big you can choose how many lines to read at a time)"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteChoice {
    NewFile,
    EditExisting,
}

impl WriteChoice {
    pub const ALL: [Self; 2] = [Self::NewFile, Self::EditExisting];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewFile => "Write new file (.txt supported only)",
            Self::EditExisting => "Edit existing file",
        }
    }
}

/// What the routed flow did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Read(ReadSummary),
    Created(PathBuf),
    Edited(EditorExit),
}

pub struct MenuController<P, L, W: Write> {
    prompter: P,
    launcher: L,
    console: Console<W>,
    reader: PaginatedReader,
    root: PathBuf,
}

impl<P, L, W> MenuController<P, L, W>
where
    P: Prompter,
    L: EditorLauncher,
    W: Write,
{
    pub fn new(
        prompter: P,
        launcher: L,
        console: Console<W>,
        reader: PaginatedReader,
        root: PathBuf,
    ) -> Self {
        Self {
            prompter,
            launcher,
            console,
            reader,
            root,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn into_parts(self) -> (P, L, Console<W>) {
        (self.prompter, self.launcher, self.console)
    }

    pub async fn run(&mut self) -> CoreResult<MenuOutcome> {
        let outcome = match self.choose_main()? {
            MainChoice::Read => self.read_flow().map(MenuOutcome::Read)?,

            MainChoice::Write => match self.choose_write()? {
                WriteChoice::NewFile => create_and_edit(
                    &mut self.prompter,
                    &self.launcher,
                    &mut self.console,
                    &self.root,
                )
                .await
                .map(MenuOutcome::Created)?,

                WriteChoice::EditExisting => {
                    edit_existing(&mut self.prompter, &self.launcher, &self.root)
                        .await
                        .map(MenuOutcome::Edited)?
                }
            },
        };

        info!("Menu flow finished: {:?}", outcome);
        Ok(outcome)
    }

    /// Applies the exit policy to a failed [`run`](Self::run).
    ///
    /// Cancellation is a normal exit and fatal errors come back as `Err`.
    /// Anything else is printed in red and swallowed.
    pub fn settle(&mut self, err: CoreError) -> CoreResult<()> {
        if err.is_cancelled() {
            info!("User cancelled");
            return Ok(());
        }

        let err = err.trace();
        if err.is_fatal() {
            return Err(err);
        }

        warn!("Run ended with a reported error: {}", err);
        self.console.line(Tone::Error, &err.to_string())?;
        self.console.flush()
    }

    fn choose_main(&mut self) -> CoreResult<MainChoice> {
        choose(&mut self.prompter, MAIN_QUESTION, &MainChoice::ALL, |c| c.label())
    }

    fn choose_write(&mut self) -> CoreResult<WriteChoice> {
        choose(&mut self.prompter, WRITE_QUESTION, &WriteChoice::ALL, |c| c.label())
    }

    fn read_flow(&mut self) -> CoreResult<ReadSummary> {
        let path = select_file(&mut self.prompter, READ_QUESTION, &self.root)?;

        self.reader.read_path(&path, &mut self.console, &mut self.prompter)
    }
}

fn choose<P, C>(
    prompter: &mut P,
    message: &str,
    options: &[C],
    label: impl Fn(C) -> &'static str,
) -> CoreResult<C>
where
    P: Prompter + ?Sized,
    C: Copy,
{
    let labels: Vec<String> = options.iter().map(|c| label(*c).to_string()).collect();
    let idx = prompter.select(message, &labels)?;

    options
        .get(idx)
        .copied()
        .ok_or_else(|| CoreError::invalid_input("choice", "selection out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReaderConfig;
    use crate::editor::launcher::recording::RecordingEditor;
    use crate::prompt::scripted::{Answer, ScriptedPrompter};
    use crate::reader::paginator::{ReadMode, ReadOutcome};
    use tempfile::TempDir;

    fn controller(
        answers: Vec<Answer>,
        root: &Path,
        reader: ReaderConfig,
    ) -> MenuController<ScriptedPrompter, RecordingEditor, Vec<u8>> {
        MenuController::new(
            ScriptedPrompter::new(answers),
            RecordingEditor::default(),
            Console::new(Vec::new(), false),
            PaginatedReader::new(reader),
            root.to_path_buf(),
        )
    }

    fn lines(n: usize) -> String {
        (1..=n).map(|i| format!("row {i}\n")).collect()
    }

    #[tokio::test]
    async fn test_read_route_pages_large_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("big.log"), lines(7)).unwrap();

        let mut menu = controller(
            vec![
                Answer::Choose("Read from a file"),
                Answer::Choose("big.log"),
                Answer::Text(String::new()),
            ],
            temp_dir.path(),
            ReaderConfig::default().with_threshold(10),
        );

        let outcome = menu.run().await.unwrap();

        match outcome {
            MenuOutcome::Read(summary) => {
                assert_eq!(summary.mode, ReadMode::Paged);
                assert_eq!(summary.outcome, ReadOutcome::Completed);
                assert_eq!(summary.lines_printed, 7);
            }
            other => panic!("Expected Read outcome, got {other:?}"),
        }

        let (prompter, editor, console) = menu.into_parts();
        assert!(editor.opened().is_empty());
        assert_eq!(prompter.asked[0], MAIN_QUESTION);
        assert_eq!(prompter.asked[1], READ_QUESTION);
        assert!(String::from_utf8(console.into_inner()).unwrap().contains("row 7"));
    }

    #[tokio::test]
    async fn test_write_new_file_route() {
        let temp_dir = TempDir::new().unwrap();

        let mut menu = controller(
            vec![
                Answer::Choose("Write into a file"),
                Answer::Choose("Write new file"),
                Answer::Text("journal".to_string()),
                Answer::Text(String::new()),
            ],
            temp_dir.path(),
            ReaderConfig::default(),
        );

        let outcome = menu.run().await.unwrap();

        let created = temp_dir.path().join("journal.txt");
        assert_eq!(outcome, MenuOutcome::Created(created.clone()));

        let (prompter, editor, _) = menu.into_parts();
        assert_eq!(editor.opened(), [created]);
        assert_eq!(prompter.offered[1].len(), 2);
    }

    #[tokio::test]
    async fn test_write_edit_existing_route() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("todo.txt"), "milk").unwrap();

        let mut menu = controller(
            vec![
                Answer::Choose("Write into a file"),
                Answer::Choose("Edit existing file"),
                Answer::Choose("todo.txt"),
            ],
            temp_dir.path(),
            ReaderConfig::default(),
        );

        let outcome = menu.run().await.unwrap();

        assert_eq!(outcome, MenuOutcome::Edited(EditorExit { code: Some(0) }));
        let (_, editor, _) = menu.into_parts();
        assert_eq!(editor.opened(), [temp_dir.path().join("todo.txt")]);
    }

    #[tokio::test]
    async fn test_cancel_at_top_menu() {
        let temp_dir = TempDir::new().unwrap();
        let mut menu = controller(vec![Answer::Cancel], temp_dir.path(), ReaderConfig::default());

        let result = menu.run().await;

        assert!(matches!(result, Err(CoreError::Cancelled)));
    }

    fn printed(menu: MenuController<ScriptedPrompter, RecordingEditor, Vec<u8>>) -> String {
        let (_, _, console) = menu.into_parts();
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn test_settle_cancelled_is_silent() {
        let temp_dir = TempDir::new().unwrap();
        let mut menu = controller(vec![], temp_dir.path(), ReaderConfig::default());

        assert!(menu.settle(CoreError::Cancelled).is_ok());
        assert!(printed(menu).is_empty());
    }

    #[test]
    fn test_settle_prints_and_swallows_ordinary_errors() {
        let temp_dir = TempDir::new().unwrap();
        let mut menu = controller(vec![], temp_dir.path(), ReaderConfig::default());

        let result = menu.settle(CoreError::empty_directory(temp_dir.path()));

        assert!(result.is_ok());
        assert!(printed(menu).starts_with("No files found under"));
    }

    #[test]
    fn test_settle_returns_permission_failures() {
        let temp_dir = TempDir::new().unwrap();
        let mut menu = controller(vec![], temp_dir.path(), ReaderConfig::default());

        let denied_path = menu.settle(CoreError::PathAccessDenied("/srv/secret".into()));
        assert!(matches!(denied_path, Err(CoreError::PathAccessDenied(_))));

        let denied_create = menu.settle(CoreError::file_create(
            Path::new("/srv/new.txt"),
            &std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        ));
        assert!(matches!(denied_create, Err(CoreError::FileCreate { .. })));

        assert!(printed(menu).is_empty());
    }

    #[tokio::test]
    async fn test_read_from_empty_root_reports_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut menu = controller(
            vec![Answer::Choose("Read from a file")],
            temp_dir.path(),
            ReaderConfig::default(),
        );

        let result = menu.run().await;

        assert!(matches!(result, Err(CoreError::EmptyDirectory { .. })));
    }
}
