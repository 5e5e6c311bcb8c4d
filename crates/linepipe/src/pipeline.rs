//! Pipeline orchestration: create the channels, fork the children, wire each
//! process to its role loop.
//!
//! Both channels exist before any fork so every process inherits the full
//! descriptor set; immediately after each fork a process drops the ends it
//! does not own, otherwise downstream readers would never observe
//! end-of-stream. The echo child is forked first, then the edit child, so
//! edit can record all three pids; echo only knows capture and itself, and
//! relies on capture re-broadcasting shutdown signals.

use std::fs::File;
use std::io;

use tracing::{debug, info};

use crate::Result;
use crate::channel::channel;
use crate::process::{self, Forked, Pid, RoleSet};
use crate::roles::{RaiseSignal, Role, capture, echo, edit};
use crate::shutdown::{self, ShutdownCoordinator};
use crate::terminal;

/// Runs the whole pipeline. Returns in every process: the capture process
/// after draining and reaping its children, the children after their role
/// loop ends. Signal-triggered shutdown never reaches this return.
pub fn run() -> Result<()> {
    let (line_rx, line_tx) = channel()?;
    let (echo_rx, echo_tx) = channel()?;
    let capture_pid = process::current();

    let echo_pid = match process::spawn(Role::Echo)? {
        Forked::Child => {
            drop(line_rx);
            drop(line_tx);
            drop(echo_tx);
            let role_set = RoleSet::new(vec![capture_pid, process::current()]);
            return run_role(Role::Echo, role_set, move || {
                echo::run(echo_rx, io::stdout().lock())
            });
        }
        Forked::Parent(pid) => pid,
    };

    let edit_pid = match process::spawn(Role::Edit)? {
        Forked::Child => {
            drop(line_tx);
            drop(echo_rx);
            let role_set = RoleSet::new(vec![capture_pid, echo_pid, process::current()]);
            return run_role(Role::Edit, role_set, move || {
                edit::run(line_rx, echo_tx, &RaiseSignal)
            });
        }
        Forked::Parent(pid) => pid,
    };

    drop(line_rx);
    drop(echo_rx);
    run_capture(capture_pid, echo_pid, edit_pid, line_tx, echo_tx)
}

/// Child-process wrapper: install the coordinator, run the role loop,
/// escalate any fatal error.
fn run_role(role: Role, role_set: RoleSet, body: impl FnOnce() -> Result<()>) -> Result<()> {
    let _coordinator = match ShutdownCoordinator::install(role_set) {
        Ok(coordinator) => coordinator,
        Err(err) => shutdown::escalate(role, err),
    };
    debug!(%role, pid = %process::current(), "role started");
    match body() {
        Ok(()) => {
            debug!(%role, "role finished");
            Ok(())
        }
        Err(err) => shutdown::escalate(role, err),
    }
}

fn run_capture(
    capture_pid: Pid,
    echo_pid: Pid,
    edit_pid: Pid,
    line_tx: File,
    echo_tx: File,
) -> Result<()> {
    let role_set = RoleSet::new(vec![capture_pid, echo_pid, edit_pid]);
    let _coordinator = match ShutdownCoordinator::install(role_set) {
        Ok(coordinator) => coordinator,
        Err(err) => shutdown::escalate(Role::Capture, err),
    };
    let raw_mode = match terminal::enter_raw_mode() {
        Ok(guard) => guard,
        Err(err) => shutdown::escalate(Role::Capture, err),
    };
    info!(pid = %capture_pid, %echo_pid, %edit_pid, "pipeline started");

    // The role loop owns both write ends; when it returns on end-of-stream
    // they are closed, and the children drain and exit on their own.
    let result = capture::run(io::stdin().lock(), echo_tx, line_tx, &RaiseSignal);
    drop(raw_mode);

    match result {
        Ok(()) => {
            process::wait_for(edit_pid);
            process::wait_for(echo_pid);
            debug!("pipeline drained");
            Ok(())
        }
        Err(err) => shutdown::escalate(Role::Capture, err),
    }
}
