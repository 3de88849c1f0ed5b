#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Dependency installer abstraction for preflight
//!
//! The bootstrap runner never talks to the installer tool directly; it goes
//! through the [`DependencyInstaller`] trait so tests can substitute a fake.
//! The production implementation drives `pip` as an external process and
//! passes its diagnostic output straight through to the console.

mod pip;

pub use pip::PipInstaller;

use async_trait::async_trait;
use preflight_errors::Error;
use std::path::Path;

/// External tool that resolves and installs packages from a manifest.
///
/// Both operations are black boxes from the runner's perspective: they
/// either complete or fail, and the tool's own output is the diagnostic.
#[async_trait]
pub trait DependencyInstaller: Send + Sync {
    /// Self-upgrade the installer tool in the current environment.
    async fn upgrade(&self) -> Result<(), Error>;

    /// Install every dependency declared in the manifest file.
    async fn install_from(&self, manifest: &Path) -> Result<(), Error>;
}
