use std::io;

use tracing::{debug, warn};

use crate::error::{Result, TeleopError};

/// Switches a terminal in and out of raw mode
pub trait TerminalMode {
    fn enable_raw(&mut self) -> io::Result<()>;
    fn disable_raw(&mut self) -> io::Result<()>;
}

/// The process's controlling terminal, through crossterm
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermMode;

impl TerminalMode for CrosstermMode {
    fn enable_raw(&mut self) -> io::Result<()> {
        crossterm::terminal::enable_raw_mode()
    }

    fn disable_raw(&mut self) -> io::Result<()> {
        crossterm::terminal::disable_raw_mode()
    }
}

/// Holds the terminal in raw mode and restores it on drop, so the prior
/// mode comes back on normal return, early `?` return and unwinding.
///
/// Raw means no echo, no line buffering and no signal keys: Ctrl-C
/// arrives as a key event instead of killing the process.
pub struct RawModeGuard<M: TerminalMode = CrosstermMode> {
    mode: M,
}

impl RawModeGuard<CrosstermMode> {
    pub fn enable() -> Result<Self> {
        Self::with_mode(CrosstermMode)
    }
}

impl<M: TerminalMode> RawModeGuard<M> {
    pub fn with_mode(mut mode: M) -> Result<Self> {
        mode.enable_raw().map_err(TeleopError::Terminal)?;
        debug!("terminal switched to raw mode");
        Ok(Self { mode })
    }
}

impl<M: TerminalMode> Drop for RawModeGuard<M> {
    fn drop(&mut self) {
        match self.mode.disable_raw() {
            Ok(()) => debug!("terminal mode restored"),
            Err(e) => warn!(error = %e, "failed to restore terminal mode"),
        }
    }
}
