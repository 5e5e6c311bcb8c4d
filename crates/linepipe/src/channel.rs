//! Unidirectional byte channels over OS pipes.
//!
//! Each endpoint owns its descriptor and closes it on drop. After a fork,
//! every process must drop the ends it does not own; a reader observes
//! end-of-stream only once the last write end anywhere in the process group
//! is closed.

use std::fs::File;
use std::io;
use std::os::fd::FromRawFd;

use crate::Result;
use crate::error::PipelineError;

/// Creates one channel, returning `(read end, write end)`.
///
/// Both channels of the pipeline must exist before any fork so the children
/// inherit the full descriptor set.
pub fn channel() -> Result<(File, File)> {
    let mut fds: [libc::c_int; 2] = [0; 2];
    // SAFETY: fds is a valid out-buffer for two descriptors.
    if unsafe { libc::pipe(fds.as_mut_ptr()) } < 0 {
        return Err(PipelineError::ChannelCreate(io::Error::last_os_error()));
    }
    // SAFETY: pipe(2) just handed us exclusive ownership of both descriptors.
    let reader = unsafe { File::from_raw_fd(fds[0]) };
    let writer = unsafe { File::from_raw_fd(fds[1]) };
    Ok((reader, writer))
}
