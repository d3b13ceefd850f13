//! Error type for terminal and event-loop failures.
//!
//! Input decoding and tree editing never fail; only talking to the
//! environment (terminal size and modes, signals, I/O) can.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not query terminal size: {0}")]
    TerminalSize(#[source] io::Error),

    #[error("could not change terminal mode: {0}")]
    TerminalMode(#[source] io::Error),

    #[error("could not register signal handler: {0}")]
    Signal(#[source] io::Error),

    #[error("terminal reported an unusable size of {columns}x{rows}")]
    InvalidTerminalSize { columns: u16, rows: u16 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
