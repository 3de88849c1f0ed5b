//! Working-directory primitive: create-if-absent, no-op when present

use preflight_errors::{BootstrapError, Error};
use preflight_events::{AppEvent, BootstrapEvent, EventEmitter, EventSender};
use std::path::Path;
use tracing::debug;

/// Ensure the working directory exists.
///
/// Idempotent: an existing directory is left untouched, including its
/// contents. Missing parent segments are created along with the target.
///
/// # Errors
///
/// Returns [`BootstrapError::WorkDirConflict`] when the path is occupied by
/// a non-directory, or [`BootstrapError::WorkDirCreateFailed`] when the
/// filesystem refuses creation.
pub async fn ensure_work_dir(path: &Path, tx: Option<&EventSender>) -> Result<(), Error> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => {
            debug!(path = %path.display(), "working directory already present");
            if let Some(tx) = tx {
                tx.emit(AppEvent::Bootstrap(BootstrapEvent::WorkDirAlreadyPresent {
                    path: path.display().to_string(),
                }));
            }
            Ok(())
        }
        Ok(_) => Err(BootstrapError::WorkDirConflict {
            path: path.display().to_string(),
        }
        .into()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tokio::fs::create_dir_all(path).await.map_err(|e| {
                BootstrapError::WorkDirCreateFailed {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            })?;
            debug!(path = %path.display(), "created working directory");
            if let Some(tx) = tx {
                tx.emit(AppEvent::Bootstrap(BootstrapEvent::WorkDirCreated {
                    path: path.display().to_string(),
                }));
            }
            Ok(())
        }
        Err(e) => Err(Error::io_with_path(&e, path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preflight_errors::BootstrapError;

    #[tokio::test]
    async fn creates_missing_directory_with_parents() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("var/data/uploads");

        ensure_work_dir(&target, None).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn existing_directory_is_a_no_op() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("uploads");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("kept.txt"), "contents").unwrap();

        ensure_work_dir(&target, None).await.unwrap();
        assert!(target.join("kept.txt").exists());
    }

    #[tokio::test]
    async fn regular_file_at_target_is_a_conflict() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("uploads");
        std::fs::write(&target, "not a directory").unwrap();

        let err = ensure_work_dir(&target, None).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Bootstrap(BootstrapError::WorkDirConflict { .. })
        ));
    }
}
