#![deny(clippy::all)]

//! Process, channel and signal plumbing for the linepipe pipeline.
//!
//! The capture process forks the echo and edit processes, wires them together
//! with two pipes, and every process watches for shutdown signals through its
//! own coordinator thread. The editing semantics live in `linepipe-core`.

pub mod channel;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod roles;
pub mod shutdown;
pub mod telemetry;
pub mod terminal;

pub use error::PipelineError;
pub use roles::Role;

pub type Result<T> = std::result::Result<T, PipelineError>;
