//! Process creation and the signal fanout set.

use std::fmt;
use std::io;
use std::ptr;

use tracing::debug;

use crate::Result;
use crate::error::PipelineError;
use crate::roles::Role;

/// A process identifier captured at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pid(libc::pid_t);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outcome of a fork, seen from each side.
pub enum Forked {
    Parent(Pid),
    Child,
}

/// The current process id.
pub fn current() -> Pid {
    // SAFETY: getpid never fails.
    Pid(unsafe { libc::getpid() })
}

/// Forks a child for `role`.
///
/// Must only be called while the process is still single-threaded; the
/// coordinator thread is installed after all forks, once per process.
pub fn spawn(role: Role) -> Result<Forked> {
    // SAFETY: single-threaded at every call site, so the child inherits no
    // locks held by other threads.
    match unsafe { libc::fork() } {
        -1 => Err(PipelineError::Spawn {
            role,
            source: io::Error::last_os_error(),
        }),
        0 => Ok(Forked::Child),
        child => Ok(Forked::Parent(Pid(child))),
    }
}

/// Sends `signal` to `pid`, ignoring delivery failures: the peer may already
/// have exited, and the broadcast is idempotent.
pub fn send_signal(pid: Pid, signal: libc::c_int) {
    // SAFETY: plain kill(2) on a recorded pid.
    unsafe {
        libc::kill(pid.0, signal);
    }
}

/// Blocks until `pid` exits. Used by the capture process to reap its
/// children on the end-of-stream drain path.
pub fn wait_for(pid: Pid) {
    // SAFETY: waitpid on a child we forked; the status is not needed.
    unsafe {
        libc::waitpid(pid.0, ptr::null_mut(), 0);
    }
}

/// The process ids one process may need to signal during shutdown,
/// including its own. Captured once at startup, never mutated.
///
/// A child forked early does not know siblings forked after it; its
/// broadcast still reaches them because the capture process re-broadcasts
/// on receipt.
#[derive(Clone, Debug)]
pub struct RoleSet {
    members: Vec<Pid>,
}

impl RoleSet {
    pub fn new(members: Vec<Pid>) -> Self {
        Self { members }
    }

    /// Sends `signal` to every recorded process id.
    pub fn broadcast(&self, signal: libc::c_int) {
        for &pid in &self.members {
            debug!(%pid, signal, "forwarding shutdown signal");
            send_signal(pid, signal);
        }
    }
}
