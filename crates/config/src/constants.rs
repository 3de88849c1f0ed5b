//! Conventional paths and environment variable names for preflight
//!
//! The defaults mirror the packaging conventions of the platform this tool
//! bootstraps: a pip requirements file next to the application and an
//! `uploads/` directory for incoming files.

/// Default dependency manifest, relative to the invocation directory
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

/// Default working directory ensured by the last bootstrap step
pub const DEFAULT_WORK_DIR: &str = "uploads";

/// Default installer binary
pub const DEFAULT_INSTALLER_BIN: &str = "pip";

/// Optional configuration file, relative to the invocation directory
pub const CONFIG_FILE: &str = "preflight.toml";

/// Environment variable overriding the manifest path
pub const ENV_MANIFEST: &str = "PREFLIGHT_MANIFEST";

/// Environment variable overriding the working directory
pub const ENV_WORK_DIR: &str = "PREFLIGHT_WORK_DIR";

/// Environment variable overriding the installer binary
pub const ENV_INSTALLER_BIN: &str = "PREFLIGHT_PIP_BIN";
