#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Bootstrap sequence for preflight
//!
//! This crate owns the deployment bootstrap itself: three ordered steps
//! (upgrade the installer tool, install declared dependencies, ensure the
//! working directory) executed fail-fast. The first failing step terminates
//! the sequence; no error is caught or retried here.

mod runner;
mod workdir;

pub use runner::{BootstrapPhase, BootstrapReport, BootstrapRunner};
pub use workdir::ensure_work_dir;
