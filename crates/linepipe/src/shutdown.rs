//! Shutdown coordination across the process group.
//!
//! Every process runs one coordinator thread watching for SIGABRT and
//! SIGTERM. The first signal received wins: the coordinator stops listening,
//! forwards the identical signal to every recorded role process, restores
//! the terminal and exits the process with status 0. Roles never handle
//! signals themselves; they detect a condition locally and raise against
//! their own pid, letting the coordinator do the propagation.

use std::thread::{self, JoinHandle};

use signal_hook::consts::{SIGABRT, SIGTERM};
use signal_hook::iterator::Signals;
use signal_hook::low_level;
use tracing::{error, info};

use crate::Result;
use crate::error::PipelineError;
use crate::process::RoleSet;
use crate::roles::Role;
use crate::terminal;

pub struct ShutdownCoordinator {
    #[allow(dead_code)]
    handle: JoinHandle<()>,
}

impl ShutdownCoordinator {
    /// Installs the coordinator for the current process.
    ///
    /// Called once per process, after the forks; the watcher thread outlives
    /// the role loop and ends the process itself.
    pub fn install(roles: RoleSet) -> Result<Self> {
        let mut signals =
            Signals::new([SIGABRT, SIGTERM]).map_err(PipelineError::SignalSetup)?;

        let handle = thread::Builder::new()
            .name("shutdown".to_string())
            .spawn(move || {
                let received = signals.forever().next();
                if let Some(signal) = received {
                    info!(signal, "shutdown signal received, propagating to all roles");
                    // Stop consuming further deliveries before fanning out;
                    // the broadcast includes our own pid.
                    signals.handle().close();
                    roles.broadcast(signal);
                    terminal::restore();
                    std::process::exit(0);
                }
            })
            .map_err(PipelineError::SignalSetup)?;

        Ok(Self { handle })
    }
}

/// Fatal-error path shared by all roles: report the error, request group
/// shutdown by raising SIGTERM against the current process, and wait for the
/// coordinator to end the process.
///
/// When no coordinator is installed yet (a failure during setup), the raise
/// terminates the process through the default SIGTERM disposition instead.
pub fn escalate(role: Role, err: PipelineError) -> ! {
    error!(%role, error = %err, "fatal error, requesting pipeline shutdown");
    if low_level::raise(SIGTERM).is_err() {
        // raise can only fail on an invalid signal number; exit directly.
        std::process::exit(1);
    }
    loop {
        thread::park();
    }
}
