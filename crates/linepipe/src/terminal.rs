//! Terminal mode control for the capture process.
//!
//! Raw, non-echoing mode is entered once before the pipeline starts and must
//! be restored on every shutdown path. Restoration is idempotent, so both
//! the RAII guard and the shutdown coordinator may call it.

use std::io::{self, IsTerminal};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::debug;

use crate::Result;
use crate::error::PipelineError;

/// Restores cooked, echoing mode while dropped.
pub struct RawModeGuard {
    active: bool,
}

/// Switches the controlling terminal to raw, non-echoing mode.
///
/// When standard input is not a terminal (tests, redirected input) this is a
/// no-op: the pipeline then reads plain bytes and nothing needs restoring.
pub fn enter_raw_mode() -> Result<RawModeGuard> {
    if !io::stdin().is_terminal() {
        debug!("stdin is not a terminal, leaving mode untouched");
        return Ok(RawModeGuard { active: false });
    }
    enable_raw_mode().map_err(PipelineError::Terminal)?;
    Ok(RawModeGuard { active: true })
}

/// Restores cooked mode. Safe to call from any process at any time; a
/// process that never entered raw mode restores nothing.
pub fn restore() {
    let _ = disable_raw_mode();
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            restore();
        }
    }
}
