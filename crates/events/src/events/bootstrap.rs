use serde::{Deserialize, Serialize};

/// The ordered steps of the bootstrap sequence.
///
/// Variant order is the execution order; no step starts unless every
/// preceding step completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapStep {
    /// Self-upgrade of the dependency-installer tool
    UpgradeInstaller,
    /// Install declared dependencies from the manifest
    InstallDependencies,
    /// Create the working directory if absent
    EnsureWorkDir,
}

impl BootstrapStep {
    /// All steps in execution order
    #[must_use]
    pub const fn ordered() -> [BootstrapStep; 3] {
        [
            BootstrapStep::UpgradeInstaller,
            BootstrapStep::InstallDependencies,
            BootstrapStep::EnsureWorkDir,
        ]
    }

    /// Stable name used in events and error messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BootstrapStep::UpgradeInstaller => "upgrade-installer",
            BootstrapStep::InstallDependencies => "install-dependencies",
            BootstrapStep::EnsureWorkDir => "ensure-work-dir",
        }
    }
}

impl std::fmt::Display for BootstrapStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle events for the bootstrap sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BootstrapEvent {
    /// Sequence started
    Started { total_steps: usize },

    /// A step is about to run
    StepStarted { step: BootstrapStep },

    /// A step finished successfully
    StepCompleted { step: BootstrapStep },

    /// A step failed; the sequence aborts here
    StepFailed { step: BootstrapStep, error: String },

    /// Working directory already existed; creation skipped
    WorkDirAlreadyPresent { path: String },

    /// Working directory was created
    WorkDirCreated { path: String },

    /// Every step completed
    Completed { duration_ms: u64 },
}
