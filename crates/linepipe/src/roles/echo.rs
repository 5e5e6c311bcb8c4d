//! Echo role: relays every inbound byte to the terminal.

use std::io::{Read, Write};

use linepipe_core::MSG_SIZE;
use tracing::debug;

use crate::Result;
use crate::error::PipelineError;
use crate::roles::Role;

/// Copies the echo channel to the output sink, byte for byte.
///
/// The channel carries a mixture of single raw bytes and separator-wrapped
/// edited frames; no record size is assumed and nothing is interpreted. A
/// zero-byte read means every write end is closed: the loop returns cleanly.
pub fn run(mut echo_rx: impl Read, mut output: impl Write) -> Result<()> {
    let mut buf = [0u8; MSG_SIZE];
    loop {
        let n = match echo_rx.read(&mut buf) {
            Ok(0) => {
                debug!("echo channel ended, echo draining");
                return Ok(());
            }
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(PipelineError::transport(
                    Role::Echo,
                    "read from echo channel",
                    e,
                ));
            }
        };
        output
            .write_all(&buf[..n])
            .map_err(|e| PipelineError::transport(Role::Echo, "write to output", e))?;
        output
            .flush()
            .map_err(|e| PipelineError::transport(Role::Echo, "flush output", e))?;
    }
}
