use serde::{Deserialize, Serialize};

/// Events emitted while driving the external dependency installer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InstallerEvent {
    /// Installer tool self-upgrade is starting
    UpgradeStarting { tool: String },

    /// Installer tool self-upgrade finished
    UpgradeCompleted { tool: String },

    /// Dependency installation from the manifest is starting
    InstallStarting { manifest: String },

    /// Dependency installation finished
    InstallCompleted { manifest: String },
}
