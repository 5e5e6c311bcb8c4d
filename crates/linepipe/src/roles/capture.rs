//! Capture role: the originating process's input loop.

use std::io::{Read, Write};

use linepipe_core::{ABORT, LINE_END, LineBuffer, MSG_SIZE};
use tracing::{debug, info, warn};

use crate::Result;
use crate::error::PipelineError;
use crate::roles::{Role, ShutdownNotifier};

/// Reads input one byte at a time until end-of-stream.
///
/// Every byte is forwarded to the echo channel before being interpreted, so
/// the terminal shows each keystroke as typed. The abort byte notifies the
/// coordinator; a line-end byte ships the accumulated frame to the edit
/// role; everything else is appended to the line under construction.
///
/// On end-of-stream the loop returns cleanly. The caller drops the write
/// ends, which lets the edit and echo processes drain and exit.
pub fn run(
    mut input: impl Read,
    mut echo_tx: impl Write,
    mut line_tx: impl Write,
    notifier: &impl ShutdownNotifier,
) -> Result<()> {
    let mut line = LineBuffer::new();
    let mut overflowed = false;
    let mut unit = [0u8; 1];

    loop {
        let n = read_retrying(&mut input, &mut unit, "read input")?;
        if n == 0 {
            debug!("input stream ended, capture draining");
            return Ok(());
        }
        let byte = unit[0];

        echo_tx
            .write_all(&unit)
            .map_err(|e| PipelineError::transport(Role::Capture, "write to echo channel", e))?;
        echo_tx
            .flush()
            .map_err(|e| PipelineError::transport(Role::Capture, "flush echo channel", e))?;

        if byte == ABORT {
            info!("abort control byte received");
            notifier.abort();
        } else if byte == LINE_END {
            line_tx
                .write_all(&line.take_frame())
                .map_err(|e| PipelineError::transport(Role::Capture, "write to line channel", e))?;
            overflowed = false;
        } else if !line.push(byte) && !overflowed {
            warn!(capacity = MSG_SIZE - 1, "line full, dropping input bytes");
            overflowed = true;
        }
    }
}

fn read_retrying(input: &mut impl Read, buf: &mut [u8], op: &'static str) -> Result<usize> {
    loop {
        match input.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(PipelineError::transport(Role::Capture, op, e)),
        }
    }
}
