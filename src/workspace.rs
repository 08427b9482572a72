//! Per-task workspace lifecycle
//!
//! A [`StorageRoot`] is process-wide state: one directory, created at startup
//! if absent, never torn down. Every submitted batch gets its own
//! [`Workspace`] subdirectory named by the task id, so concurrent tasks only
//! ever write to disjoint subtrees. Zip archives live beside the workspaces at
//! the root itself, which lets a workspace be deleted independently of the
//! archive built from it.

use crate::error::{Error, Result};
use crate::types::TaskId;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Process-wide root directory for workspaces and archives
#[derive(Clone, Debug)]
pub struct StorageRoot {
    path: PathBuf,
}

impl StorageRoot {
    /// Open the storage root, creating the directory if it does not exist
    ///
    /// Called once at startup. Pre-existing entries (workspaces abandoned by a
    /// crash) are left alone; no reaper runs over them.
    pub async fn init(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        tokio::fs::create_dir_all(&path).await.map_err(|e| {
            Error::Storage(format!(
                "failed to create storage root {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!(path = %path.display(), "storage root ready");
        Ok(Self { path })
    }

    /// The root directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a task's workspace directory under this root
    ///
    /// Purely a path computation; the directory may or may not exist.
    pub fn workspace_path(&self, task_id: &str) -> PathBuf {
        self.path.join(task_id)
    }

    /// Path of an archive file stored directly under this root
    pub fn archive_path(&self, filename: &str) -> PathBuf {
        self.path.join(filename)
    }

    /// Create an empty workspace directory for a task
    pub async fn create_workspace(&self, task_id: &TaskId) -> Result<Workspace> {
        let path = self.workspace_path(task_id.as_str());
        tokio::fs::create_dir(&path).await.map_err(|e| {
            Error::Storage(format!(
                "failed to create workspace {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!(task_id = %task_id, path = %path.display(), "workspace created");
        Ok(Workspace {
            path,
            task_id: task_id.clone(),
        })
    }
}

/// A per-task temporary directory
///
/// Owned exclusively by its task; deleted exactly once along every code path,
/// except while a delivery is pending (deletion is then deferred to the
/// delivery endpoint's cleanup guard).
#[derive(Clone, Debug)]
pub struct Workspace {
    path: PathBuf,
    task_id: TaskId,
}

impl Workspace {
    /// The workspace directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The owning task's identifier
    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// List the files currently in the workspace, sorted by filename
    ///
    /// Subdirectories are not expected (the extraction template writes flat)
    /// and are skipped if present.
    pub async fn list_files(&self) -> Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(&self.path).await.map_err(|e| {
            Error::Storage(format!(
                "failed to read workspace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            Error::Storage(format!(
                "failed to read workspace entry in {}: {}",
                self.path.display(),
                e
            ))
        })? {
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Delete the workspace directory and everything in it
    ///
    /// Idempotent: deleting a workspace that is already gone is not an error,
    /// and any other failure is logged and swallowed. The directory either
    /// ends up absent or a warning explains why it could not be removed.
    pub async fn delete(&self) {
        match tokio::fs::remove_dir_all(&self.path).await {
            Ok(()) => {
                debug!(task_id = %self.task_id, path = %self.path.display(), "workspace deleted");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(
                    task_id = %self.task_id,
                    path = %self.path.display(),
                    error = %e,
                    "failed to delete workspace"
                );
            }
        }
    }
}
