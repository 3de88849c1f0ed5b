//! CLI error handling

use std::fmt;

use preflight_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Bootstrap or installer error
    Bootstrap(preflight_errors::Error),
    /// I/O error
    Io(std::io::Error),
}

impl CliError {
    /// Exit status handed back to the hosting platform
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Bootstrap(e) => e.exit_code(),
            CliError::Io(_) => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Bootstrap(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: re-run the whole bootstrap sequence.")?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Bootstrap(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<preflight_errors::Error> for CliError {
    fn from(e: preflight_errors::Error) -> Self {
        CliError::Bootstrap(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
