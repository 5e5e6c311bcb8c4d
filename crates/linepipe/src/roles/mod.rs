//! The three role loops.
//!
//! Each loop is generic over `Read`/`Write` endpoints and a
//! [`ShutdownNotifier`], so the state machines run unchanged against
//! in-memory buffers in tests and against pipes, stdin and stdout in the
//! real pipeline.

pub mod capture;
pub mod echo;
pub mod edit;

use std::fmt;
use std::thread;

use signal_hook::consts::{SIGABRT, SIGTERM};
use signal_hook::low_level;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Capture,
    Edit,
    Echo,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Capture => "capture",
            Role::Edit => "edit",
            Role::Echo => "echo",
        };
        f.write_str(name)
    }
}

/// How a role hands a locally detected shutdown condition to the
/// coordinator. Detection and propagation stay separate: the role only
/// notifies, the coordinator broadcasts.
pub trait ShutdownNotifier {
    /// Abnormal shutdown, triggered by the abort control byte.
    fn abort(&self);
    /// Normal shutdown, triggered by the terminate edit rule. Allowed to
    /// never return.
    fn terminate(&self);
}

/// Production notifier: raises the signal against the current process, where
/// the coordinator thread picks it up.
pub struct RaiseSignal;

impl ShutdownNotifier for RaiseSignal {
    /// The capture loop keeps echoing after an abort until the coordinator
    /// ends the process, so this returns.
    fn abort(&self) {
        let _ = low_level::raise(SIGABRT);
    }

    /// Does not return: the edit loop is done once it requests termination,
    /// and returning would end the process's main thread — taking the
    /// coordinator thread down before it can broadcast. Park until the
    /// coordinator exits the process instead.
    fn terminate(&self) {
        let _ = low_level::raise(SIGTERM);
        loop {
            thread::park();
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ShutdownNotifier;
    use std::cell::Cell;

    /// Records notifications instead of raising signals.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub aborts: Cell<usize>,
        pub terminates: Cell<usize>,
    }

    impl ShutdownNotifier for RecordingNotifier {
        fn abort(&self) {
            self.aborts.set(self.aborts.get() + 1);
        }

        fn terminate(&self) {
            self.terminates.set(self.terminates.get() + 1);
        }
    }
}
