//! Edit role: hosts the line-editing engine.

use std::io::{Read, Write};

use linepipe_core::{EMPTY_FRAME, LINE_SEP, LineFrame, edit_line};
use tracing::{debug, info};

use crate::Result;
use crate::error::PipelineError;
use crate::roles::{Role, ShutdownNotifier};

/// Consumes full frames from the line channel and emits edited frames,
/// wrapped in line separators, to the echo channel.
///
/// A read of zero bytes at a frame boundary is the upstream closing its
/// write end: the loop returns cleanly so the echo role can drain in turn.
/// Zero bytes in the middle of a frame is a truncated frame and fatal.
///
/// When an edited line carried the terminate rule, the notifier is invoked
/// after that line's output is emitted.
pub fn run(
    mut line_rx: impl Read,
    mut echo_tx: impl Write,
    notifier: &impl ShutdownNotifier,
) -> Result<()> {
    loop {
        let frame = match read_frame(&mut line_rx)? {
            Some(frame) => frame,
            None => {
                debug!("line channel ended, edit draining");
                return Ok(());
            }
        };

        let edited = edit_line(&frame);

        for (op, bytes) in [
            ("write separator to echo channel", LINE_SEP),
            ("write edited frame to echo channel", &edited.frame[..]),
            ("write separator to echo channel", LINE_SEP),
        ] {
            echo_tx
                .write_all(bytes)
                .map_err(|e| PipelineError::transport(Role::Edit, op, e))?;
        }
        echo_tx
            .flush()
            .map_err(|e| PipelineError::transport(Role::Edit, "flush echo channel", e))?;

        if edited.terminate {
            info!("terminate rule processed, requesting pipeline shutdown");
            // The production notifier never returns from this; only test
            // notifiers fall through to the clean return.
            notifier.terminate();
            return Ok(());
        }
    }
}

/// Reads exactly one frame, distinguishing a clean end-of-stream (`None`)
/// from a truncated frame (error).
fn read_frame(line_rx: &mut impl Read) -> Result<Option<LineFrame>> {
    let mut frame = EMPTY_FRAME;
    let mut filled = 0;
    while filled < frame.len() {
        match line_rx.read(&mut frame[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(PipelineError::ShortFrame { role: Role::Edit }),
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(PipelineError::transport(
                    Role::Edit,
                    "read from line channel",
                    e,
                ));
            }
        }
    }
    Ok(Some(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::test_support::RecordingNotifier;
    use linepipe_core::MSG_SIZE;
    use std::io::Cursor;

    fn frame_of(bytes: &[u8]) -> Vec<u8> {
        let mut frame = vec![0u8; MSG_SIZE];
        frame[..bytes.len()].copy_from_slice(bytes);
        frame
    }

    fn run_edit(input: Vec<u8>) -> (Result<()>, Vec<u8>, RecordingNotifier) {
        let mut echo = Vec::new();
        let notifier = RecordingNotifier::default();
        let result = run(Cursor::new(input), &mut echo, &notifier);
        (result, echo, notifier)
    }

    fn framed(content: &[u8]) -> Vec<u8> {
        let mut expected = LINE_SEP.to_vec();
        expected.extend_from_slice(&frame_of(content));
        expected.extend_from_slice(LINE_SEP);
        expected
    }

    #[test]
    fn test_edited_frame_is_separator_wrapped() {
        let (result, echo, _) = run_edit(frame_of(b"abc"));
        result.unwrap();
        assert_eq!(echo, framed(b"zbc"));
    }

    #[test]
    fn test_consecutive_frames_edited_in_order() {
        let mut input = frame_of(b"abX");
        input.extend_from_slice(&frame_of(b"abK"));
        let (result, echo, _) = run_edit(input);
        result.unwrap();

        let mut expected = framed(b"z");
        expected.extend_from_slice(&framed(b""));
        assert_eq!(echo, expected);
    }

    #[test]
    fn test_end_of_stream_returns_cleanly() {
        let (result, echo, notifier) = run_edit(Vec::new());
        result.unwrap();
        assert!(echo.is_empty());
        assert_eq!(notifier.terminates.get(), 0);
    }

    #[test]
    fn test_truncated_frame_is_fatal() {
        let (result, _, _) = run_edit(vec![b'a'; MSG_SIZE / 2]);
        assert!(matches!(
            result,
            Err(PipelineError::ShortFrame { role: Role::Edit })
        ));
    }

    #[test]
    fn test_terminate_emits_line_then_notifies_once() {
        let mut input = frame_of(b"xyT");
        // A frame after the terminate must never be consumed.
        input.extend_from_slice(&frame_of(b"abc"));
        let (result, echo, notifier) = run_edit(input);
        result.unwrap();
        assert_eq!(echo, framed(b"xy"));
        assert_eq!(notifier.terminates.get(), 1);
        assert_eq!(notifier.aborts.get(), 0);
    }
}
