//! Domain-driven events for the bootstrap sequence

mod bootstrap;
mod general;
mod installer;

pub use bootstrap::{BootstrapEvent, BootstrapStep};
pub use general::GeneralEvent;
pub use installer::InstallerEvent;

use serde::{Deserialize, Serialize};

/// Top-level application event grouping all domains
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum AppEvent {
    Bootstrap(BootstrapEvent),
    Installer(InstallerEvent),
    General(GeneralEvent),
}
