//! Wire protocol shared by the three pipeline roles.
//!
//! Every message crossing the line channel is a fixed-size, zero-padded
//! frame: no length prefix, no checksum. The echo channel additionally
//! carries single raw bytes and `LINE_SEP`-wrapped edited frames; its
//! consumer relays bytes without assuming a record size.

/// Size of every frame crossing the line channel, in bytes.
pub const MSG_SIZE: usize = 128;

/// Completes the current line (`E`).
pub const LINE_END: u8 = 0x45;
/// Erases the previous character during editing (`X`).
pub const BACKSPACE: u8 = 0x58;
/// Discards everything edited so far on the current line (`K`).
pub const LINE_KILL: u8 = 0x4B;
/// Requests normal pipeline termination after the current line (`T`).
pub const NORM_TERM: u8 = 0x54;
/// Aborts the pipeline immediately (Ctrl+K).
pub const ABORT: u8 = 0x0B;
/// Source byte of the substitution rule (`a`).
pub const SUB_FROM: u8 = 0x61;
/// Replacement byte of the substitution rule (`z`).
pub const SUB_TO: u8 = 0x7A;

/// Separator written before and after each edited frame on the echo channel.
pub const LINE_SEP: &[u8] = b"\r\n";

/// One zero-padded line of input or output. Content is the bytes strictly
/// before the first zero byte.
pub type LineFrame = [u8; MSG_SIZE];

/// A fully zeroed frame.
pub const EMPTY_FRAME: LineFrame = [0; MSG_SIZE];

/// Returns the content of a frame: the bytes before the first zero byte.
pub fn frame_content(frame: &LineFrame) -> &[u8] {
    let end = frame.iter().position(|&b| b == 0).unwrap_or(frame.len());
    &frame[..end]
}

/// Fixed-capacity accumulator for the line under construction in the
/// capture role.
///
/// Capacity is `MSG_SIZE - 1` so the frame handed off always keeps at least
/// one trailing zero byte. Bytes pushed past capacity are dropped; `push`
/// reports the drop so the caller can log it.
#[derive(Debug)]
pub struct LineBuffer {
    frame: LineFrame,
    len: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            frame: EMPTY_FRAME,
            len: 0,
        }
    }

    /// Appends a byte at the next free position. Returns `false` when the
    /// buffer is full and the byte was dropped.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.len >= MSG_SIZE - 1 {
            return false;
        }
        self.frame[self.len] = byte;
        self.len += 1;
        true
    }

    /// Hands off the completed frame by value and resets the buffer to empty.
    pub fn take_frame(&mut self) -> LineFrame {
        let frame = self.frame;
        self.frame = EMPTY_FRAME;
        self.len = 0;
        frame
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
