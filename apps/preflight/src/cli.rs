//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;

/// preflight - deployment bootstrap runner
///
/// Invoked by the hosting platform's build pipeline with no required
/// arguments; everything has a conventional default.
#[derive(Parser)]
#[command(name = "preflight")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Prepare the runtime environment before the application starts")]
#[command(long_about = None)]
pub struct Cli {
    /// Output the final result in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging to stderr
    #[arg(long)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dependency manifest handed to the installer
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Working directory ensured by the last step
    #[arg(long, value_name = "PATH")]
    pub work_dir: Option<PathBuf>,

    /// Installer binary to invoke
    #[arg(long, value_name = "BIN")]
    pub pip_bin: Option<String>,
}
