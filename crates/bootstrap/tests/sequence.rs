//! Integration tests for the bootstrap sequence
//!
//! The installer is replaced by a fake so the ordering and fail-fast
//! invariants can be asserted without any external tool.

use async_trait::async_trait;
use preflight_bootstrap::{BootstrapPhase, BootstrapRunner};
use preflight_config::Config;
use preflight_errors::{BootstrapError, Error, InstallerError};
use preflight_events::{AppEvent, BootstrapEvent, BootstrapStep};
use preflight_installer::DependencyInstaller;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Test double honoring the `DependencyInstaller` contract: `install_from`
/// fails when the manifest is missing, both operations can be forced to fail.
struct FakeInstaller {
    calls: Arc<Mutex<Vec<String>>>,
    fail_upgrade: bool,
    fail_install: bool,
}

impl FakeInstaller {
    fn new(calls: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            calls,
            fail_upgrade: false,
            fail_install: false,
        }
    }
}

#[async_trait]
impl DependencyInstaller for FakeInstaller {
    async fn upgrade(&self) -> Result<(), Error> {
        self.calls.lock().unwrap().push("upgrade".to_string());
        if self.fail_upgrade {
            return Err(InstallerError::UpgradeFailed {
                message: "simulated network outage".to_string(),
                status: Some(1),
            }
            .into());
        }
        Ok(())
    }

    async fn install_from(&self, manifest: &Path) -> Result<(), Error> {
        self.calls.lock().unwrap().push("install".to_string());
        if !manifest.exists() {
            return Err(InstallerError::ManifestNotFound {
                path: manifest.display().to_string(),
            }
            .into());
        }
        if self.fail_install {
            return Err(InstallerError::InstallFailed {
                message: "simulated unresolvable package".to_string(),
                status: Some(1),
            }
            .into());
        }
        Ok(())
    }
}

struct Sandbox {
    _temp: TempDir,
    manifest: PathBuf,
    work_dir: PathBuf,
    config: Config,
}

fn sandbox() -> Sandbox {
    let temp = tempfile::tempdir().unwrap();
    let manifest = temp.path().join("requirements.txt");
    let work_dir = temp.path().join("uploads");

    let mut config = Config::default();
    config.paths.manifest = manifest.clone();
    config.paths.work_dir = work_dir.clone();

    Sandbox {
        _temp: temp,
        manifest,
        work_dir,
        config,
    }
}

#[tokio::test]
async fn full_sequence_succeeds_and_creates_the_directory() {
    let sb = sandbox();
    std::fs::write(&sb.manifest, "flask==3.0.0\n").unwrap();

    let calls = Arc::new(Mutex::new(Vec::new()));
    let installer = FakeInstaller::new(calls.clone());
    let (tx, mut rx) = preflight_events::channel();

    let mut runner =
        BootstrapRunner::new(Box::new(installer), sb.config.clone()).with_event_sender(tx);
    let report = runner.run().await.unwrap();

    assert_eq!(report.steps_completed, 3);
    assert_eq!(runner.phase(), BootstrapPhase::Done);
    assert!(sb.work_dir.is_dir());
    assert_eq!(*calls.lock().unwrap(), vec!["upgrade", "install"]);

    // The step events arrive in execution order, Completed last.
    drop(runner);
    let mut steps = Vec::new();
    let mut completed_last = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            AppEvent::Bootstrap(BootstrapEvent::StepStarted { step }) => {
                completed_last = false;
                steps.push(step);
            }
            AppEvent::Bootstrap(BootstrapEvent::Completed { .. }) => completed_last = true,
            _ => {}
        }
    }
    assert_eq!(
        steps,
        vec![
            BootstrapStep::UpgradeInstaller,
            BootstrapStep::InstallDependencies,
            BootstrapStep::EnsureWorkDir,
        ]
    );
    assert!(completed_last);
}

#[tokio::test]
async fn rerun_with_existing_directory_is_idempotent() {
    let sb = sandbox();
    std::fs::write(&sb.manifest, "flask==3.0.0\n").unwrap();
    std::fs::create_dir(&sb.work_dir).unwrap();
    std::fs::write(sb.work_dir.join("receipt.jpg"), "bytes").unwrap();

    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut runner = BootstrapRunner::new(Box::new(FakeInstaller::new(calls)), sb.config.clone());
    runner.run().await.unwrap();

    // Pre-existing contents are untouched.
    assert!(sb.work_dir.join("receipt.jpg").exists());
    assert_eq!(runner.phase(), BootstrapPhase::Done);
}

#[tokio::test]
async fn missing_manifest_aborts_before_directory_creation() {
    let sb = sandbox();
    // No manifest written.

    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut runner =
        BootstrapRunner::new(Box::new(FakeInstaller::new(calls.clone())), sb.config.clone());
    let err = runner.run().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Installer(InstallerError::ManifestNotFound { .. })
    ));
    assert_eq!(runner.phase(), BootstrapPhase::Failed);
    // Ordering invariant: the directory step never ran.
    assert!(!sb.work_dir.exists());
    assert_eq!(*calls.lock().unwrap(), vec!["upgrade", "install"]);
}

#[tokio::test]
async fn failed_upgrade_prevents_the_install_step() {
    let sb = sandbox();
    std::fs::write(&sb.manifest, "flask==3.0.0\n").unwrap();

    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut installer = FakeInstaller::new(calls.clone());
    installer.fail_upgrade = true;

    let mut runner = BootstrapRunner::new(Box::new(installer), sb.config.clone());
    let err = runner.run().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Installer(InstallerError::UpgradeFailed { .. })
    ));
    assert_eq!(*calls.lock().unwrap(), vec!["upgrade"]);
    assert!(!sb.work_dir.exists());
}

#[tokio::test]
async fn failed_install_carries_the_tool_exit_status() {
    let sb = sandbox();
    std::fs::write(&sb.manifest, "no-such-package==9.9.9\n").unwrap();

    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut installer = FakeInstaller::new(calls);
    installer.fail_install = true;

    let mut runner = BootstrapRunner::new(Box::new(installer), sb.config.clone());
    let err = runner.run().await.unwrap_err();

    assert_eq!(err.exit_code(), 1);
    assert!(!sb.work_dir.exists());
}

#[tokio::test]
async fn work_dir_conflict_fails_after_the_installer_steps() {
    let sb = sandbox();
    std::fs::write(&sb.manifest, "flask==3.0.0\n").unwrap();
    std::fs::write(&sb.work_dir, "a file squatting on the path").unwrap();

    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut runner =
        BootstrapRunner::new(Box::new(FakeInstaller::new(calls.clone())), sb.config.clone());
    let err = runner.run().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Bootstrap(BootstrapError::WorkDirConflict { .. })
    ));
    // Both installer steps had already succeeded.
    assert_eq!(*calls.lock().unwrap(), vec!["upgrade", "install"]);
    assert_eq!(runner.phase(), BootstrapPhase::Failed);
}
