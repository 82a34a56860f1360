//! core::artifact
//!
//! Lifecycle of the single local plan file.
//!
//! # Lifecycle
//!
//! ```text
//! plan:            clear stale file -> tool writes new file
//! apply:           require file -> tool applies it -> delete file
//! removeplanfile:  clear file if present
//! ```
//!
//! Creation is always done by the external tool; this module only checks
//! for, and removes, the file.
//!
//! # Invariants
//!
//! - [`PlanArtifact::remove`] is idempotent: an absent file is `NoOp`
//! - There is no locking; two invocations in one directory can race

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors from plan file operations.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to remove plan file '{path}': {source}")]
    RemoveFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Outcome of [`PlanArtifact::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// A plan file existed and was deleted.
    Removed,
    /// There was nothing to delete.
    NoOp,
}

/// Handle on the plan file in a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanArtifact {
    file_name: String,
    path: PathBuf,
}

impl PlanArtifact {
    /// Create a handle for `file_name` inside `dir`.
    pub fn new(dir: &Path, file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            path: dir.join(file_name),
        }
    }

    /// File name as passed to the external tool (relative to its cwd).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Absolute (or cwd-relative) path of the plan file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether a plan file is present.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Delete the plan file if present.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactError::RemoveFailed` only if the file exists and
    /// cannot be deleted. Absence is never an error.
    pub fn remove(&self) -> Result<Removal, ArtifactError> {
        if !self.exists() {
            debug!(path = %self.path.display(), "no plan file to remove");
            return Ok(Removal::NoOp);
        }

        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "removed plan file");
                Ok(Removal::Removed)
            }
            // Someone else removed it between the check and the delete.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Removal::NoOp),
            Err(e) => Err(ArtifactError::RemoveFailed {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn absent_file_does_not_exist() {
        let temp = TempDir::new().unwrap();
        let artifact = PlanArtifact::new(temp.path(), ".tfplan");
        assert!(!artifact.exists());
    }

    #[test]
    fn remove_deletes_existing_file() {
        let temp = TempDir::new().unwrap();
        let artifact = PlanArtifact::new(temp.path(), ".tfplan");
        fs::write(artifact.path(), b"opaque plan bytes").unwrap();
        assert!(artifact.exists());

        assert_eq!(artifact.remove().unwrap(), Removal::Removed);
        assert!(!artifact.exists());
    }

    #[test]
    fn remove_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let artifact = PlanArtifact::new(temp.path(), ".tfplan");
        fs::write(artifact.path(), b"plan").unwrap();

        assert_eq!(artifact.remove().unwrap(), Removal::Removed);
        assert_eq!(artifact.remove().unwrap(), Removal::NoOp);
        assert_eq!(artifact.remove().unwrap(), Removal::NoOp);
    }

    #[test]
    fn directory_with_plan_name_is_not_an_artifact() {
        let temp = TempDir::new().unwrap();
        let artifact = PlanArtifact::new(temp.path(), ".tfplan");
        fs::create_dir(artifact.path()).unwrap();

        assert!(!artifact.exists());
        assert_eq!(artifact.remove().unwrap(), Removal::NoOp);
        assert!(artifact.path().is_dir());
    }

    #[test]
    fn file_name_is_kept_relative() {
        let artifact = PlanArtifact::new(Path::new("/infra/testing"), "custom.plan");
        assert_eq!(artifact.file_name(), "custom.plan");
        assert_eq!(artifact.path(), Path::new("/infra/testing/custom.plan"));
    }
}
