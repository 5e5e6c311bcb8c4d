//! The line-editing engine: a pure transform from a completed input frame to
//! an edited output frame plus a termination flag.

use crate::protocol::{BACKSPACE, EMPTY_FRAME, LINE_KILL, LineFrame, NORM_TERM, SUB_FROM, SUB_TO};

/// Result of editing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedLine {
    /// Zero-padded edited output.
    pub frame: LineFrame,
    /// True when the line contained the normal-terminate byte; the hosting
    /// role requests pipeline shutdown after emitting this line.
    pub terminate: bool,
}

/// Edits one completed line.
///
/// Scans the input left to right until the first zero byte, applying exactly
/// one rule per byte:
/// - the substitution source byte is replaced with its target;
/// - backspace erases the previously written output byte, unless it is the
///   first byte of the line or the output cursor is already at the start,
///   in which case it is inert;
/// - line-kill discards all output produced so far and restarts the output
///   at position zero;
/// - normal-terminate sets the termination flag and stops the scan;
/// - every other byte is copied through unchanged.
pub fn edit_line(input: &LineFrame) -> EditedLine {
    let mut frame = EMPTY_FRAME;
    let mut cursor = 0;
    let mut terminate = false;

    for (pos, &byte) in input.iter().enumerate() {
        if byte == 0 || cursor >= frame.len() {
            break;
        }
        match byte {
            SUB_FROM => {
                frame[cursor] = SUB_TO;
                cursor += 1;
            }
            BACKSPACE => {
                if pos != 0 && cursor > 0 {
                    cursor -= 1;
                    frame[cursor] = 0;
                }
            }
            LINE_KILL => {
                frame = EMPTY_FRAME;
                cursor = 0;
            }
            NORM_TERM => {
                terminate = true;
                break;
            }
            other => {
                frame[cursor] = other;
                cursor += 1;
            }
        }
    }

    EditedLine { frame, terminate }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{MSG_SIZE, frame_content};
    use proptest::prelude::*;

    fn frame_of(bytes: &[u8]) -> LineFrame {
        let mut frame = EMPTY_FRAME;
        frame[..bytes.len()].copy_from_slice(bytes);
        frame
    }

    fn edited(bytes: &[u8]) -> EditedLine {
        edit_line(&frame_of(bytes))
    }

    #[test]
    fn test_substitution() {
        let out = edited(b"abc");
        assert_eq!(frame_content(&out.frame), b"zbc");
        assert!(!out.terminate);
    }

    #[test]
    fn test_backspace_erases_previous() {
        let out = edited(b"abX");
        assert_eq!(frame_content(&out.frame), b"z");
    }

    #[test]
    fn test_backspace_then_more_input() {
        let out = edited(b"abXc");
        assert_eq!(frame_content(&out.frame), b"zc");
    }

    #[test]
    fn test_leading_backspace_is_inert() {
        let out = edited(b"Xbc");
        assert_eq!(frame_content(&out.frame), b"bc");
    }

    #[test]
    fn test_backspace_at_output_start_is_inert() {
        // Both erasable bytes are gone by the third X.
        let out = edited(b"bcXXXd");
        assert_eq!(frame_content(&out.frame), b"d");
    }

    #[test]
    fn test_line_kill_discards_output() {
        let out = edited(b"abK");
        assert_eq!(out.frame, EMPTY_FRAME);
    }

    #[test]
    fn test_line_kill_restarts_at_position_zero() {
        let out = edited(b"abKcd");
        assert_eq!(frame_content(&out.frame), b"cd");
    }

    #[test]
    fn test_terminate_stops_scan() {
        let out = edited(b"xyTab");
        assert_eq!(frame_content(&out.frame), b"xy");
        assert!(out.terminate);
    }

    #[test]
    fn test_terminate_on_empty_line() {
        let out = edited(b"T");
        assert_eq!(out.frame, EMPTY_FRAME);
        assert!(out.terminate);
    }

    #[test]
    fn test_empty_line() {
        let out = edit_line(&EMPTY_FRAME);
        assert_eq!(out.frame, EMPTY_FRAME);
        assert!(!out.terminate);
    }

    #[test]
    fn test_full_frame_without_terminator() {
        // An unterminated frame must not run the cursor past the output.
        let out = edit_line(&[b'a'; MSG_SIZE]);
        assert_eq!(frame_content(&out.frame), [b'z'; MSG_SIZE]);
    }

    /// Bytes that trigger no edit rule.
    fn plain_byte() -> impl Strategy<Value = u8> {
        (1u8..=127).prop_filter("no control or substitution bytes", |b| {
            !matches!(*b, SUB_FROM | BACKSPACE | LINE_KILL | NORM_TERM)
        })
    }

    fn plain_line() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(plain_byte(), 0..MSG_SIZE - 1)
    }

    fn editable_line() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(
            prop_oneof![
                plain_byte(),
                Just(SUB_FROM),
                Just(BACKSPACE),
                Just(LINE_KILL),
            ],
            0..MSG_SIZE - 1,
        )
    }

    proptest! {
        #[test]
        fn prop_plain_lines_only_substituted(line in proptest::collection::vec(
            prop_oneof![plain_byte(), Just(SUB_FROM)],
            0..MSG_SIZE - 1,
        )) {
            let out = edit_line(&frame_of(&line));
            let expected: Vec<u8> = line
                .iter()
                .map(|&b| if b == SUB_FROM { SUB_TO } else { b })
                .collect();
            prop_assert_eq!(frame_content(&out.frame), expected.as_slice());
            prop_assert!(!out.terminate);
        }

        #[test]
        fn prop_leading_backspace_is_removed(line in plain_line()) {
            let mut with_backspace = vec![BACKSPACE];
            with_backspace.extend_from_slice(&line);
            let out = edit_line(&frame_of(&with_backspace));
            prop_assert_eq!(out, edit_line(&frame_of(&line)));
        }

        #[test]
        fn prop_output_is_suffix_after_last_kill(line in editable_line()) {
            let out = edit_line(&frame_of(&line));
            if let Some(last) = line.iter().rposition(|&b| b == LINE_KILL) {
                // The kill leaves the engine in its initial state, so the
                // suffix edits from scratch.
                let suffix = &line[last + 1..];
                prop_assert_eq!(out, edit_line(&frame_of(suffix)));
            }
        }

        #[test]
        fn prop_terminate_hides_trailing_bytes(
            prefix in plain_line(),
            suffix in editable_line(),
        ) {
            let mut line = prefix.clone();
            line.push(NORM_TERM);
            line.extend_from_slice(&suffix);
            line.truncate(MSG_SIZE - 1);
            let out = edit_line(&frame_of(&line));
            prop_assert!(out.terminate);
            prop_assert_eq!(out.frame, edit_line(&frame_of(&prefix)).frame);
        }
    }
}
