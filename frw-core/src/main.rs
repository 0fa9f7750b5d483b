//! src/main.rs
//! Interactive file reader / writer entry point

use std::{
    io,
    panic::PanicHookInfo,
    path::PathBuf,
};

use anyhow::{Context, Result};
use crossterm::{cursor::Show, execute, terminal::disable_raw_mode};
use tracing::{error, info};

use frw_core::{
    Logger,
    config::{Config, ReaderConfig},
    controller::{MenuController, MenuOutcome},
    editor::CommandEditor,
    prompt::{Console, TerminalPrompter},
    reader::PaginatedReader,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let (config, config_error) = match Config::load().await {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let log_dir: PathBuf = Config::log_dir().context("Failed to resolve log directory")?;
    let _log_guard = Logger::init_tracing(&log_dir, &config.log_level)
        .context("Failed to initialize logging")?;

    if let Some(e) = config_error {
        info!("Failed to load config, using defaults: {}", e);
    }

    setup_panic_handler();
    info!("Starting frw");

    let root: PathBuf = tokio::fs::canonicalize(".")
        .await
        .context("Failed to get current directory")?;

    let editor = CommandEditor::from_command_line(&config.editor_cmd)
        .context("Invalid editor_cmd in config")?;

    let mut menu = MenuController::new(
        TerminalPrompter::new(),
        editor,
        Console::stdout(),
        PaginatedReader::new(ReaderConfig::default()),
        root,
    );
    info!("Scan root: {}", menu.root().display());

    match menu.run().await {
        Ok(outcome) => log_outcome(&outcome),
        Err(e) => menu
            .settle(e)
            .context("Unrecoverable filesystem failure")?,
    }

    info!("Application exited cleanly");
    Ok(())
}

fn log_outcome(outcome: &MenuOutcome) {
    match outcome {
        MenuOutcome::Read(summary) => info!(
            "Read finished: {:?}, {} lines printed",
            summary.outcome, summary.lines_printed
        ),
        MenuOutcome::Created(path) => info!("Created and edited {}", path.display()),
        MenuOutcome::Edited(exit) => info!("Editor exited with {:?}", exit.code),
    }
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), Show);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
