#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for preflight
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (./preflight.toml)
//! - Environment variables
//! - CLI flags (applied by the binary, highest precedence)

use preflight_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub mod constants;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub installer: InstallerConfig,
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    /// Dependency manifest handed to the installer
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
    /// Directory ensured by the last bootstrap step
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
}

/// Installer tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerConfig {
    /// Installer binary invoked for upgrade and install
    #[serde(default = "default_installer_bin")]
    pub bin: String,
    /// Extra arguments appended to every installer invocation
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            work_dir: default_work_dir(),
        }
    }
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            bin: default_installer_bin(),
            extra_args: Vec::new(),
        }
    }
}

fn default_manifest() -> PathBuf {
    PathBuf::from(constants::DEFAULT_MANIFEST)
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(constants::DEFAULT_WORK_DIR)
}

fn default_installer_bin() -> String {
    constants::DEFAULT_INSTALLER_BIN.to_string()
}

impl Config {
    /// Load configuration from an explicit path
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not valid TOML.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).await.map_err(|_| {
            Error::from(ConfigError::NotFound {
                path: path.display().to_string(),
            })
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Load configuration with defaults as fallback
    ///
    /// An explicit `--config` path must exist; the conventional
    /// `preflight.toml` is optional and silently skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file is missing, or if any
    /// present file fails to parse.
    pub async fn load_or_default(explicit: Option<&Path>) -> Result<Self, Error> {
        if let Some(path) = explicit {
            return Self::load(path).await;
        }

        let conventional = Path::new(constants::CONFIG_FILE);
        if conventional.exists() {
            Self::load(conventional).await
        } else {
            Ok(Self::default())
        }
    }

    /// Merge environment variable overrides into this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an override is set to an empty value.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Some(manifest) = env_override(constants::ENV_MANIFEST)? {
            self.paths.manifest = PathBuf::from(manifest);
        }
        if let Some(work_dir) = env_override(constants::ENV_WORK_DIR)? {
            self.paths.work_dir = PathBuf::from(work_dir);
        }
        if let Some(bin) = env_override(constants::ENV_INSTALLER_BIN)? {
            self.installer.bin = bin;
        }
        Ok(())
    }
}

fn env_override(var: &str) -> Result<Option<String>, Error> {
    match std::env::var(var) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::InvalidValue {
            field: var.to_string(),
            value: value.clone(),
        }
        .into()),
        Ok(value) => Ok(Some(value)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_conventions() {
        let config = Config::default();
        assert_eq!(config.paths.manifest, Path::new("requirements.txt"));
        assert_eq!(config.paths.work_dir, Path::new("uploads"));
        assert_eq!(config.installer.bin, "pip");
        assert!(config.installer.extra_args.is_empty());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let config: Config = toml::from_str(
            r#"
            [paths]
            work_dir = "var/uploads"
            "#,
        )
        .unwrap();
        assert_eq!(config.paths.work_dir, Path::new("var/uploads"));
        assert_eq!(config.paths.manifest, Path::new("requirements.txt"));
        assert_eq!(config.installer.bin, "pip");
    }

    #[tokio::test]
    async fn explicit_missing_config_file_is_an_error() {
        let err = Config::load(Path::new("/nonexistent/preflight.toml"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn malformed_toml_is_a_parse_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("preflight.toml");
        std::fs::write(&path, "[paths\nmanifest = 3").unwrap();

        let err = Config::load(&path).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::ParseError { .. })
        ));
    }
}
