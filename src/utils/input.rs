//! Input source for targets and interactive prompts
//!
//! When `-` is given, targets are drained from standard input. Prompts that
//! come later still need a keyboard, so the source is then switched to the
//! controlling terminal. Both ends are injectable for tests.

use crate::error::{ArgsError, Result};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};
use tracing::{debug, instrument};

/// Device reopened after standard input has been consumed
pub const TERMINAL_DEVICE: &str = "/dev/tty";

/// Line-oriented input selected once at startup
pub struct Input {
    reader: Box<dyn BufRead>,
    terminal: PathBuf,
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Input")
            .field("terminal", &self.terminal)
            .finish_non_exhaustive()
    }
}

impl Input {
    /// Process standard input, reattaching to the controlling terminal
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()), TERMINAL_DEVICE)
    }

    /// Arbitrary reader, reattaching to `terminal` once drained
    pub fn new<R, P>(reader: R, terminal: P) -> Self
    where
        R: BufRead + 'static,
        P: Into<PathBuf>,
    {
        Self {
            reader: Box::new(reader),
            terminal: terminal.into(),
        }
    }

    /// Read every remaining line as a target
    ///
    /// Lines are trimmed and blank lines are skipped. Blocks until the
    /// reader reaches end of stream.
    #[instrument(skip(self))]
    pub fn read_targets(&mut self) -> Result<Vec<String>> {
        let mut targets = Vec::new();

        for line in (&mut *self.reader).lines() {
            let line = line.map_err(ArgsError::stdin)?;
            let line = line.trim();
            if !line.is_empty() {
                targets.push(line.to_string());
            }
        }

        debug!("Read {} targets from input", targets.len());
        Ok(targets)
    }

    /// Switch to the terminal device for any later prompts
    #[instrument(skip(self))]
    pub fn reattach(&mut self) -> Result<()> {
        let file = File::open(&self.terminal)
            .map_err(|e| ArgsError::terminal(self.terminal.clone(), e))?;

        self.reader = Box::new(BufReader::new(file));
        debug!("Reattached input to {}", self.terminal.display());
        Ok(())
    }

    /// Read one line of user input, without its terminator
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        self.reader.read_line(&mut line).map_err(ArgsError::stdin)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
