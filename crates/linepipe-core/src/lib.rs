#![deny(clippy::all)]

//! Pure core of the linepipe pipeline: the wire protocol shared by the three
//! roles and the line-editing engine hosted by the edit role.
//!
//! Nothing in this crate touches the OS. The binary crate wires these types
//! to pipes, processes and signals.

mod editor;
mod protocol;

pub use editor::EditedLine;
pub use editor::edit_line;
pub use protocol::ABORT;
pub use protocol::BACKSPACE;
pub use protocol::EMPTY_FRAME;
pub use protocol::LINE_END;
pub use protocol::LINE_KILL;
pub use protocol::LINE_SEP;
pub use protocol::LineBuffer;
pub use protocol::LineFrame;
pub use protocol::MSG_SIZE;
pub use protocol::NORM_TERM;
pub use protocol::SUB_FROM;
pub use protocol::SUB_TO;
pub use protocol::frame_content;
