//! preflight - deployment bootstrap runner
//!
//! This is the CLI application that drives the bootstrap sequence through
//! the bootstrap crate: upgrade the installer tool, install declared
//! dependencies, ensure the working directory, then report completion.

mod cli;
mod display;
mod error;
mod events;

use crate::cli::Cli;
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use preflight_bootstrap::{BootstrapReport, BootstrapRunner};
use preflight_config::Config;
use preflight_events::EventReceiver;
use preflight_installer::PipInstaller;
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.json;

    init_tracing(cli.debug);

    // Run the bootstrap and map the failure onto the process exit status
    if let Err(e) = run(cli).await {
        error!("Bootstrap failed: {}", e);
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting preflight v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli);

    // Create event channel
    let (event_sender, event_receiver) = preflight_events::channel();

    let installer =
        PipInstaller::new(config.installer.clone()).with_event_sender(event_sender.clone());
    let mut runner =
        BootstrapRunner::new(Box::new(installer), config).with_event_sender(event_sender);

    let renderer = OutputRenderer::new(cli.json);
    let mut event_handler = EventHandler::new(cli.json);

    // Execute the sequence with event handling
    let report = run_with_events(&mut runner, event_receiver, &mut event_handler).await?;

    // Render final result; the completion message must be the last line
    renderer.render_report(&report, &mut std::io::stdout().lock())?;

    info!("Bootstrap completed successfully");
    Ok(())
}

/// Execute the bootstrap sequence with concurrent event handling
async fn run_with_events(
    runner: &mut BootstrapRunner,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<BootstrapReport, CliError> {
    let mut run_future = Box::pin(runner.run());

    // Handle events concurrently with sequence execution
    loop {
        select! {
            // Sequence completed
            result = &mut run_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result.map_err(CliError::from);
            }

            // Event received
            event = event_receiver.recv() => {
                match event {
                    Some(event) => event_handler.handle_event(event),
                    None => { /* Channel closed: keep waiting for the sequence to finish */ }
                }
            }
        }
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, cli: &Cli) {
    if let Some(manifest) = &cli.manifest {
        config.paths.manifest.clone_from(manifest);
    }
    if let Some(work_dir) = &cli.work_dir {
        config.paths.work_dir.clone_from(work_dir);
    }
    if let Some(bin) = &cli.pip_bin {
        config.installer.bin.clone_from(bin);
    }
}

/// Initialize tracing/logging
///
/// The bootstrap is a build-pipeline step, so logs go to stderr and stay
/// quiet unless `--debug` or `RUST_LOG` asks for more.
fn init_tracing(debug_enabled: bool) {
    let default_filter = if debug_enabled {
        "info,preflight=debug,preflight_bootstrap=debug,preflight_installer=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn cli_flags_override_config_values() {
        let mut config = Config::default();
        let cli = Cli {
            json: false,
            debug: false,
            config: None,
            manifest: Some(PathBuf::from("alt/requirements.txt")),
            work_dir: Some(PathBuf::from("alt/uploads")),
            pip_bin: Some("pip3".to_string()),
        };

        apply_cli_config(&mut config, &cli);

        assert_eq!(config.paths.manifest, Path::new("alt/requirements.txt"));
        assert_eq!(config.paths.work_dir, Path::new("alt/uploads"));
        assert_eq!(config.installer.bin, "pip3");
    }

    #[test]
    fn absent_cli_flags_keep_config_values() {
        let mut config = Config::default();
        let cli = Cli {
            json: true,
            debug: false,
            config: None,
            manifest: None,
            work_dir: None,
            pip_bin: None,
        };

        apply_cli_config(&mut config, &cli);

        assert_eq!(config.paths.manifest, Path::new("requirements.txt"));
        assert_eq!(config.paths.work_dir, Path::new("uploads"));
        assert_eq!(config.installer.bin, "pip");
    }
}
