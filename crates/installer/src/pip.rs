//! `pip`-backed implementation of [`DependencyInstaller`]

use async_trait::async_trait;
use preflight_config::InstallerConfig;
use preflight_errors::{Error, InstallerError};
use preflight_events::{AppEvent, EventEmitter, EventSender, InstallerEvent};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::DependencyInstaller;

/// Drives the `pip` binary as an external process.
///
/// stdout/stderr are inherited so the tool's own diagnostics reach the
/// console unmodified; this crate adds no formatting of its own.
pub struct PipInstaller {
    config: InstallerConfig,
    tx: Option<EventSender>,
}

impl PipInstaller {
    /// Create an installer for the configured binary
    #[must_use]
    pub fn new(config: InstallerConfig) -> Self {
        Self { config, tx: None }
    }

    /// Attach an event sender for progress reporting
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    async fn run(&self, args: &[&str]) -> Result<std::process::ExitStatus, InstallerError> {
        let mut command = Command::new(&self.config.bin);
        command
            .args(args)
            .args(&self.config.extra_args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        debug!(bin = %self.config.bin, ?args, "spawning installer tool");

        command.status().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                InstallerError::ToolNotFound {
                    tool: self.config.bin.clone(),
                }
            } else {
                InstallerError::SpawnFailed {
                    command: self.config.bin.clone(),
                    message: e.to_string(),
                }
            }
        })
    }
}

impl EventEmitter for PipInstaller {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

#[async_trait]
impl DependencyInstaller for PipInstaller {
    async fn upgrade(&self) -> Result<(), Error> {
        self.emit(AppEvent::Installer(InstallerEvent::UpgradeStarting {
            tool: self.config.bin.clone(),
        }));

        // `pip install --upgrade pip` updates the tool in place.
        let status = self.run(&["install", "--upgrade", "pip"]).await?;
        if !status.success() {
            return Err(InstallerError::UpgradeFailed {
                message: format!("{} exited with {status}", self.config.bin),
                status: status.code(),
            }
            .into());
        }

        self.emit(AppEvent::Installer(InstallerEvent::UpgradeCompleted {
            tool: self.config.bin.clone(),
        }));
        Ok(())
    }

    async fn install_from(&self, manifest: &Path) -> Result<(), Error> {
        // Fail before spawning anything when the manifest is missing; the
        // tool would only produce a less precise diagnostic.
        match tokio::fs::try_exists(manifest).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(InstallerError::ManifestNotFound {
                    path: manifest.display().to_string(),
                }
                .into());
            }
            Err(e) => return Err(Error::io_with_path(&e, manifest)),
        }

        let manifest_str = manifest.display().to_string();
        self.emit(AppEvent::Installer(InstallerEvent::InstallStarting {
            manifest: manifest_str.clone(),
        }));

        let status = self.run(&["install", "-r", manifest_str.as_str()]).await?;
        if !status.success() {
            return Err(InstallerError::InstallFailed {
                message: format!("{} exited with {status}", self.config.bin),
                status: status.code(),
            }
            .into());
        }

        self.emit(AppEvent::Installer(InstallerEvent::InstallCompleted {
            manifest: manifest_str,
        }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installer_with_bin(bin: &str) -> PipInstaller {
        PipInstaller::new(InstallerConfig {
            bin: bin.to_string(),
            extra_args: Vec::new(),
        })
    }

    #[tokio::test]
    async fn missing_tool_is_reported_as_tool_not_found() {
        let installer = installer_with_bin("/nonexistent/preflight-test-pip");

        let err = installer.upgrade().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Installer(InstallerError::ToolNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn missing_manifest_fails_before_spawning_the_tool() {
        // The binary does not exist either, so reaching spawn would surface
        // ToolNotFound instead of ManifestNotFound.
        let installer = installer_with_bin("/nonexistent/preflight-test-pip");

        let err = installer
            .install_from(Path::new("/nonexistent/requirements.txt"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Installer(InstallerError::ManifestNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn unreadable_manifest_path_surfaces_the_io_error() {
        // A regular file as a path component makes the existence check fail
        // with NotADirectory; that must not be mistaken for a missing
        // manifest.
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("requirements.txt");
        std::fs::write(&blocker, "flask==3.0.0\n").unwrap();

        let installer = installer_with_bin("/nonexistent/preflight-test-pip");
        let err = installer
            .install_from(&blocker.join("requirements.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[tokio::test]
    async fn existing_manifest_reaches_the_spawn_stage() {
        let temp = tempfile::tempdir().unwrap();
        let manifest = temp.path().join("requirements.txt");
        std::fs::write(&manifest, "flask==3.0.0\n").unwrap();

        let installer = installer_with_bin("/nonexistent/preflight-test-pip");
        let err = installer.install_from(&manifest).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Installer(InstallerError::ToolNotFound { .. })
        ));
    }
}

