//! Bootstrap sequence error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum BootstrapError {
    #[error("working directory path occupied by a non-directory: {path}")]
    WorkDirConflict { path: String },

    #[error("failed to create working directory {path}: {message}")]
    WorkDirCreateFailed { path: String, message: String },

    #[error("bootstrap step {step} failed: {message}")]
    StepFailed { step: String, message: String },
}

impl UserFacingError for BootstrapError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::WorkDirConflict { .. } => {
                Some("Remove or rename the conflicting file so the directory can be created.")
            }
            Self::WorkDirCreateFailed { .. } => {
                Some("Check filesystem permissions and free disk space.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::WorkDirConflict { .. } => Some("bootstrap.work_dir_conflict"),
            Self::WorkDirCreateFailed { .. } => Some("bootstrap.work_dir_create_failed"),
            Self::StepFailed { .. } => Some("bootstrap.step_failed"),
            _ => None,
        }
    }
}
