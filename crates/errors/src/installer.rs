//! Dependency-installer error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum InstallerError {
    #[error("installer self-upgrade failed: {message}")]
    UpgradeFailed {
        message: String,
        status: Option<i32>,
    },

    #[error("dependency manifest not found: {path}")]
    ManifestNotFound { path: String },

    #[error("dependency install failed: {message}")]
    InstallFailed {
        message: String,
        status: Option<i32>,
    },

    #[error("installer tool not found: {tool}")]
    ToolNotFound { tool: String },

    #[error("failed to spawn {command}: {message}")]
    SpawnFailed { command: String, message: String },
}

impl InstallerError {
    /// Exit status reported by the underlying tool, when it ran at all.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::UpgradeFailed { status, .. } | Self::InstallFailed { status, .. } => *status,
            _ => None,
        }
    }
}

impl UserFacingError for InstallerError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UpgradeFailed { .. } => {
                Some("Check network access and permissions for the installer tool.")
            }
            Self::ManifestNotFound { .. } => {
                Some("Create the manifest file or point --manifest at the right path.")
            }
            Self::InstallFailed { .. } => {
                Some("Inspect the installer output above for the failing package.")
            }
            Self::ToolNotFound { .. } | Self::SpawnFailed { .. } => {
                Some("Ensure the installer binary is on PATH or set --pip-bin.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        // Network blips surface through the tool's exit status; re-invoking
        // the whole sequence is the documented recovery path.
        matches!(self, Self::UpgradeFailed { .. } | Self::InstallFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::UpgradeFailed { .. } => Some("installer.upgrade_failed"),
            Self::ManifestNotFound { .. } => Some("installer.manifest_not_found"),
            Self::InstallFailed { .. } => Some("installer.install_failed"),
            Self::ToolNotFound { .. } => Some("installer.tool_not_found"),
            Self::SpawnFailed { .. } => Some("installer.spawn_failed"),
            _ => None,
        }
    }
}
