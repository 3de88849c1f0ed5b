//! Event handling and status display

use preflight_events::{AppEvent, BootstrapEvent, GeneralEvent, InstallerEvent};

/// Renders one status line per event, teletype style.
///
/// Suppressed entirely in JSON mode so machine output stays clean; installer
/// tool diagnostics still reach the console through inherited stdio.
pub struct EventHandler {
    quiet: bool,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        if self.quiet {
            return;
        }

        match event {
            AppEvent::Bootstrap(event) => self.handle_bootstrap(event),
            AppEvent::Installer(event) => Self::handle_installer(&event),
            AppEvent::General(event) => Self::handle_general(&event),
        }
    }

    fn handle_bootstrap(&mut self, event: BootstrapEvent) {
        match event {
            BootstrapEvent::Started { total_steps } => {
                println!("🚀 Bootstrap starting ({total_steps} steps)");
            }
            // Installer events announce their own steps; the directory step
            // reports through WorkDirCreated/WorkDirAlreadyPresent.
            BootstrapEvent::StepStarted { .. } => {}
            BootstrapEvent::StepCompleted { step } => {
                println!("✔ {step}");
            }
            BootstrapEvent::StepFailed { step, error } => {
                eprintln!("✖ {step}: {error}");
            }
            BootstrapEvent::WorkDirAlreadyPresent { path } => {
                println!("📁 {path} already present");
            }
            BootstrapEvent::WorkDirCreated { path } => {
                println!("📁 Created {path}");
            }
            BootstrapEvent::Completed { .. } => {}
        }
    }

    fn handle_installer(event: &InstallerEvent) {
        match event {
            InstallerEvent::UpgradeStarting { tool } => {
                println!("⬆️  Upgrading {tool}");
            }
            InstallerEvent::InstallStarting { manifest } => {
                println!("📦 Installing dependencies from {manifest}");
            }
            InstallerEvent::UpgradeCompleted { .. } | InstallerEvent::InstallCompleted { .. } => {}
        }
    }

    fn handle_general(event: &GeneralEvent) {
        match event {
            GeneralEvent::Warning { message, .. } => eprintln!("⚠️  {message}"),
            GeneralEvent::Error { message, .. } => eprintln!("✖ {message}"),
            GeneralEvent::OperationFailed { operation, error } => {
                eprintln!("✖ {operation}: {error}");
            }
            GeneralEvent::DebugLog { message } => tracing::debug!("{message}"),
            GeneralEvent::OperationStarted { .. } | GeneralEvent::OperationCompleted { .. } => {}
        }
    }
}
