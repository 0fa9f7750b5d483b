//! `src/reader/paginator.rs`
//! ============================================================================
//! # Paginated Reader
//!
//! Prints a file without flooding the terminal. Files below the size
//! threshold are dumped whole; larger files are streamed in chunks of
//! `chunk_size` non-blank lines with a continue/cancel prompt after each.
//!
//! A line that is exactly `"\n"` is dropped before it reaches the chunk
//! buffer. At EOF the final partial chunk is printed when
//! [`ReaderConfig::flush_remainder`] is set and left unprinted otherwise.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use bytesize::ByteSize;
use tracing::{debug, info};

use crate::config::ReaderConfig;
use crate::error::{CoreError, CoreResult};
use crate::fs::file_entry::FileEntry;
use crate::fs::size_gate::exceeds_len;
use crate::prompt::{
    console::{Console, Tone},
    traits::Prompter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Whole content printed at once
    Full,
    /// Chunked with prompts
    Paged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadSummary {
    pub mode: ReadMode,
    pub outcome: ReadOutcome,
    pub lines_printed: usize,
    pub chunks_flushed: usize,
    pub prompts_shown: usize,
    /// Lines read but never printed (only with `flush_remainder` off).
    pub lines_unflushed: usize,
}

impl ReadSummary {
    const fn new(mode: ReadMode) -> Self {
        Self {
            mode,
            outcome: ReadOutcome::Completed,
            lines_printed: 0,
            chunks_flushed: 0,
            prompts_shown: 0,
            lines_unflushed: 0,
        }
    }
}

/// Chunk buffer plus how far into the stream we are.
#[derive(Debug)]
pub struct PaginationState {
    buffer: Vec<String>,
    cursor: u64,
    chunk_size: usize,
}

impl PaginationState {
    #[must_use]
    pub fn new(chunk_size: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(chunk_size),
            cursor: 0,
            chunk_size,
        }
    }

    /// Takes one raw line (newline included). Returns `false` for a bare `"\n"`,
    /// which is never buffered.
    pub fn push_raw(&mut self, raw: &[u8]) -> bool {
        self.cursor += raw.len() as u64;

        if raw == b"\n" {
            return false;
        }

        let text = String::from_utf8_lossy(raw);
        self.buffer.push(text.strip_suffix('\n').unwrap_or(&text).to_string());
        true
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.buffer.len() >= self.chunk_size
    }

    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub const fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, String> {
        self.buffer.drain(..)
    }
}

pub struct PaginatedReader {
    config: ReaderConfig,
}

impl PaginatedReader {
    #[must_use]
    pub const fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Opens `path` and prints it to `console`.
    pub fn read_path<W, P>(
        &self,
        path: &Path,
        console: &mut Console<W>,
        prompter: &mut P,
    ) -> CoreResult<ReadSummary>
    where
        W: Write,
        P: Prompter + ?Sized,
    {
        let file = File::open(path).map_err(|e| CoreError::io_at(path, e))?;
        let size = file
            .metadata()
            .map_err(|e| CoreError::io_at(path, e))?
            .len();

        let name = FileEntry::name_of(path);
        self.read_stream(BufReader::new(file), size, &name, console, prompter)
    }

    /// `size` picks the strategy; `name` goes into the header and errors.
    pub fn read_stream<R, W, P>(
        &self,
        mut reader: R,
        size: u64,
        name: &str,
        console: &mut Console<W>,
        prompter: &mut P,
    ) -> CoreResult<ReadSummary>
    where
        R: BufRead,
        W: Write,
        P: Prompter + ?Sized,
    {
        console.line(
            Tone::Info,
            &format!("File name: {name} ({})", ByteSize::b(size)),
        )?;
        console.blank()?;

        let summary = if exceeds_len(size, self.config.threshold_bytes) {
            self.page(&mut reader, name, console, prompter)?
        } else {
            Self::dump(&mut reader, name, console)?
        };

        console.flush()?;

        info!(
            marker = "FILE_READ",
            file = name,
            size_bytes = size,
            mode = ?summary.mode,
            outcome = ?summary.outcome,
            lines_printed = summary.lines_printed,
            "Finished reading {}",
            name
        );

        Ok(summary)
    }

    fn dump<R, W>(reader: &mut R, name: &str, console: &mut Console<W>) -> CoreResult<ReadSummary>
    where
        R: Read,
        W: Write,
    {
        let mut raw = Vec::new();
        reader
            .read_to_end(&mut raw)
            .map_err(|e| CoreError::io_at(Path::new(name), e))?;

        let text = String::from_utf8_lossy(&raw);
        let body = text.strip_suffix('\n').unwrap_or(&text);

        let mut summary = ReadSummary::new(ReadMode::Full);
        if !raw.is_empty() {
            console.line(Tone::Info, body)?;
            summary.lines_printed = body.lines().count();
        }

        Ok(summary)
    }

    fn page<R, W, P>(
        &self,
        reader: &mut R,
        name: &str,
        console: &mut Console<W>,
        prompter: &mut P,
    ) -> CoreResult<ReadSummary>
    where
        R: BufRead,
        W: Write,
        P: Prompter + ?Sized,
    {
        let question = format!(
            "Print next {} lines? (press enter to continue, or '{}' to cancel)",
            self.config.chunk_size, self.config.cancel_token
        );

        let mut summary = ReadSummary::new(ReadMode::Paged);
        let mut state = PaginationState::new(self.config.chunk_size);
        let mut raw: Vec<u8> = Vec::new();

        loop {
            raw.clear();
            let read = reader
                .read_until(b'\n', &mut raw)
                .map_err(|e| CoreError::io_at(Path::new(name), e))?;

            if read == 0 {
                break;
            }

            if !state.push_raw(&raw) || !state.is_full() {
                continue;
            }

            Self::flush(&mut state, console, &mut summary)?;
            debug!(
                "Flushed chunk {} at byte {}",
                summary.chunks_flushed,
                state.cursor()
            );

            summary.prompts_shown += 1;
            let keep_going = match prompter.continue_input(&question) {
                Ok(answer) => answer.trim() != self.config.cancel_token,
                Err(CoreError::Cancelled) => false,
                Err(e) => return Err(e),
            };

            if !keep_going {
                summary.outcome = ReadOutcome::Cancelled;
                return Ok(summary);
            }
        }

        if self.config.flush_remainder {
            Self::flush(&mut state, console, &mut summary)?;
        } else {
            summary.lines_unflushed = state.buffered();
        }

        Ok(summary)
    }

    fn flush<W: Write>(
        state: &mut PaginationState,
        console: &mut Console<W>,
        summary: &mut ReadSummary,
    ) -> CoreResult<()> {
        if state.buffered() == 0 {
            return Ok(());
        }

        for line in state.drain() {
            console.line(Tone::Info, &line)?;
            summary.lines_printed += 1;
        }
        console.flush()?;

        summary.chunks_flushed += 1;
        Ok(())
    }
}
