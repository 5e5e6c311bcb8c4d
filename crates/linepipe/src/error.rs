//! Pipeline errors.
//!
//! Every error here is fatal: the detecting role reports it and requests
//! shutdown of the whole process group. No retries, no local recovery.

use std::io;

use thiserror::Error;

use crate::roles::Role;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to create channel: {0}")]
    ChannelCreate(#[source] io::Error),
    #[error("failed to spawn {role} process: {source}")]
    Spawn { role: Role, source: io::Error },
    #[error("{role} failed to {op}: {source}")]
    Transport {
        role: Role,
        op: &'static str,
        source: io::Error,
    },
    #[error("{role} read a truncated frame from the line channel")]
    ShortFrame { role: Role },
    #[error("failed to install shutdown coordinator: {0}")]
    SignalSetup(#[source] io::Error),
    #[error("terminal mode change failed: {0}")]
    Terminal(#[source] io::Error),
}

impl PipelineError {
    /// Transport failure while `role` performed `op` on a channel or stream.
    pub fn transport(role: Role, op: &'static str, source: io::Error) -> Self {
        PipelineError::Transport { role, op, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_names_role_and_op() {
        let err = PipelineError::transport(
            Role::Capture,
            "write to echo channel",
            io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"),
        );
        let msg = err.to_string();
        assert!(msg.contains("capture"));
        assert!(msg.contains("write to echo channel"));
    }

    #[test]
    fn test_short_frame_message() {
        let err = PipelineError::ShortFrame { role: Role::Edit };
        assert!(err.to_string().contains("truncated frame"));
    }
}
