//! Controlling-terminal helpers.

use crate::error::{Error, Result};
use crate::geometry::Size;

/// The terminal's size in cells.
pub fn terminal_size() -> Result<Size> {
    let (columns, rows) = crossterm::terminal::size().map_err(Error::TerminalSize)?;
    if columns == 0 || rows == 0 {
        tracing::error!(columns, rows, "terminal reported an empty size");
        return Err(Error::InvalidTerminalSize { columns, rows });
    }
    Ok(Size::new(columns, rows))
}

/// Keeps the terminal in raw mode until dropped.
///
/// Raw mode turns off echo and line buffering, so the app sees every byte
/// (including Ctrl-C as `0x03`) as it is typed.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn enable() -> Result<Self> {
        crossterm::terminal::enable_raw_mode().map_err(|err| {
            tracing::error!(%err, "could not enable raw mode");
            Error::TerminalMode(err)
        })?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = crossterm::terminal::disable_raw_mode() {
            tracing::error!(%err, "could not restore terminal mode");
        }
    }
}
