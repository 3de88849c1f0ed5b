//! Fail-fast runner for the ordered bootstrap steps

use preflight_config::Config;
use preflight_errors::Error;
use preflight_events::{AppEvent, BootstrapEvent, BootstrapStep, EventEmitter, EventSender};
use preflight_installer::DependencyInstaller;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use crate::workdir::ensure_work_dir;

/// States of the bootstrap sequence.
///
/// `Failed` is terminal and short-circuits every remaining state; `Done` is
/// the only state from which the completion message may be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapPhase {
    Start,
    Upgrading,
    Installing,
    EnsuringWorkDir,
    Done,
    Failed,
}

impl BootstrapPhase {
    const fn for_step(step: BootstrapStep) -> Self {
        match step {
            BootstrapStep::UpgradeInstaller => Self::Upgrading,
            BootstrapStep::InstallDependencies => Self::Installing,
            BootstrapStep::EnsureWorkDir => Self::EnsuringWorkDir,
        }
    }
}

/// Outcome of a fully successful bootstrap sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapReport {
    /// Number of steps that ran (always the full sequence on success)
    pub steps_completed: usize,
    /// Wall-clock duration of the whole sequence
    pub duration_ms: u64,
}

/// Executes the bootstrap steps in order, aborting at the first failure.
///
/// The installer is injected behind [`DependencyInstaller`] so tests can
/// substitute a fake; the runner itself never touches the network.
pub struct BootstrapRunner {
    installer: Box<dyn DependencyInstaller>,
    config: Config,
    tx: Option<EventSender>,
    phase: BootstrapPhase,
}

impl BootstrapRunner {
    /// Create a runner for the given installer and configuration
    #[must_use]
    pub fn new(installer: Box<dyn DependencyInstaller>, config: Config) -> Self {
        Self {
            installer,
            config,
            tx: None,
            phase: BootstrapPhase::Start,
        }
    }

    /// Attach an event sender for progress reporting
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Current state of the sequence
    #[must_use]
    pub fn phase(&self) -> BootstrapPhase {
        self.phase
    }

    /// Run every bootstrap step in order.
    ///
    /// Steps execute strictly sequentially; step N+1 never begins unless
    /// step N succeeded. The first error is returned as-is, with no retry
    /// and no partial-success state.
    ///
    /// # Errors
    ///
    /// Returns the failing step's error: an `InstallerError` for the two
    /// installer steps or a `BootstrapError` for the working-directory step.
    pub async fn run(&mut self) -> Result<BootstrapReport, Error> {
        let start = Instant::now();
        let steps = BootstrapStep::ordered();

        self.emit(AppEvent::Bootstrap(BootstrapEvent::Started {
            total_steps: steps.len(),
        }));

        let mut steps_completed = 0;
        for step in steps {
            self.phase = BootstrapPhase::for_step(step);
            self.emit(AppEvent::Bootstrap(BootstrapEvent::StepStarted { step }));
            debug!(%step, "bootstrap step starting");

            if let Err(e) = self.execute_step(step).await {
                self.phase = BootstrapPhase::Failed;
                self.emit(AppEvent::Bootstrap(BootstrapEvent::StepFailed {
                    step,
                    error: e.to_string(),
                }));
                return Err(e);
            }

            steps_completed += 1;
            self.emit(AppEvent::Bootstrap(BootstrapEvent::StepCompleted { step }));
        }

        self.phase = BootstrapPhase::Done;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.emit(AppEvent::Bootstrap(BootstrapEvent::Completed {
            duration_ms,
        }));
        info!(duration_ms, "bootstrap sequence completed");

        Ok(BootstrapReport {
            steps_completed,
            duration_ms,
        })
    }

    async fn execute_step(&self, step: BootstrapStep) -> Result<(), Error> {
        match step {
            BootstrapStep::UpgradeInstaller => self.installer.upgrade().await,
            BootstrapStep::InstallDependencies => {
                self.installer.install_from(&self.config.paths.manifest).await
            }
            BootstrapStep::EnsureWorkDir => {
                ensure_work_dir(&self.config.paths.work_dir, self.tx.as_ref()).await
            }
        }
    }
}

impl EventEmitter for BootstrapRunner {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}
