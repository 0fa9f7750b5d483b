//! "Write" side of the menu: create-and-edit and edit-existing.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::controller::selector::select_file;
use crate::editor::launcher::{EditorExit, EditorLauncher};
use crate::error::{CoreError, CoreResult};
use crate::fs::file_creator::{create_empty, normalize_file_name, resolve_destination};
use crate::prompt::{
    console::{Console, Tone},
    traits::Prompter,
};

const NAME_QUESTION: &str = "What do you want to name your file? (no extensions allowed)";
const DIR_QUESTION: &str =
    "Please type the absolute/relative path where you want to save this file";
const EDIT_QUESTION: &str = "What file do you want to edit?";

const PATH_EXAMPLES: [&str; 3] = [
    "Absolute path example (macOS): /Users/<username>/Documents/notes",
    "Absolute path example (windows): C:/Users/<username>/Documents/notes",
    "Relative path example: util",
];

/// Picks an existing file under `root` and opens it.
pub async fn edit_existing<P, L>(
    prompter: &mut P,
    launcher: &L,
    root: &Path,
) -> CoreResult<EditorExit>
where
    P: Prompter + ?Sized,
    L: EditorLauncher + ?Sized,
{
    let path = select_file(prompter, EDIT_QUESTION, root)?;

    launcher.launch(&path).await
}

/// Asks for a name and directory until an empty `.txt` file can be created
/// there, then opens it. Cancelling any prompt ends the flow.
pub async fn create_and_edit<P, L, W>(
    prompter: &mut P,
    launcher: &L,
    console: &mut Console<W>,
    base_dir: &Path,
) -> CoreResult<PathBuf>
where
    P: Prompter + ?Sized,
    L: EditorLauncher + ?Sized,
    W: Write,
{
    let path = loop {
        match attempt_create(prompter, console, base_dir) {
            Ok(path) => break path,

            Err(e) if e.is_cancelled() || e.is_fatal() => return Err(e),

            Err(e) if e.is_recoverable() => {
                warn!("File creation attempt failed: {}", e);
                report_failure(console, &e)?;
            }

            Err(e) => return Err(e),
        }
    };

    console.line(Tone::Success, &format!("Created {}", path.display()))?;
    console.flush()?;

    let exit = launcher.launch(&path).await?;
    info!("Editing {} finished with {:?}", path.display(), exit.code);

    Ok(path)
}

fn attempt_create<P, W>(
    prompter: &mut P,
    console: &mut Console<W>,
    base_dir: &Path,
) -> CoreResult<PathBuf>
where
    P: Prompter + ?Sized,
    W: Write,
{
    let file_name = normalize_file_name(&prompter.input(NAME_QUESTION)?)?;

    console.blank()?;
    for example in PATH_EXAMPLES {
        console.line(Tone::Info, example)?;
    }
    console.flush()?;

    let dir_input = prompter.input(DIR_QUESTION)?;
    let path = resolve_destination(base_dir, &dir_input, &file_name);

    create_empty(&path)?;
    Ok(path)
}

fn report_failure<W: Write>(console: &mut Console<W>, err: &CoreError) -> CoreResult<()> {
    console.blank()?;
    console.line(
        Tone::Error,
        "Oops! Something went wrong. It seems like your pathname/filename is invalid.",
    )?;
    console.line(Tone::Error, &err.to_string())?;
    console.line(Tone::Info, "File name example: example_file")?;
    for example in PATH_EXAMPLES {
        console.line(Tone::Info, example)?;
    }
    console.blank()?;

    console.flush()
}
