//! Workspace packaging
//!
//! Decides the shape of the deliverable once a batch has run: a single
//! retrieved media file is served directly, anything else (several songs, a
//! song plus its lyric file) gets flattened into one zip archive. Archives
//! live at the storage root, beside the workspaces rather than inside them,
//! so a workspace can be deleted independently of the archive built from it.

use crate::error::{Error, Result};
use crate::types::Artifact;
use crate::workspace::{StorageRoot, Workspace};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Extensions a task can produce as its media output
const MEDIA_EXTENSIONS: &[&str] = &[".mp3", ".mp4"];

/// Whether a filename names a media file (as opposed to a lyric file)
fn is_media_file(name: &str) -> bool {
    MEDIA_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

fn base_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::Storage(format!("unrepresentable filename: {}", path.display())))
}

/// Package a populated workspace into an [`Artifact`]
///
/// The decision rule: exactly one file whose name ends in a media extension
/// is served directly; every other file set (including a media file with its
/// lyric file) is zipped. An empty workspace means every URL in the batch
/// failed: the workspace is deleted and the batch surfaces as
/// [`Error::RetrievalFailed`].
pub async fn package(root: &StorageRoot, workspace: &Workspace) -> Result<Artifact> {
    let files = workspace.list_files().await?;

    if files.is_empty() {
        warn!(
            workspace = %workspace.path().display(),
            "batch produced no files, deleting workspace"
        );
        workspace.delete().await;
        return Err(Error::RetrievalFailed(
            "every URL in the batch failed; upstream may be blocking this host or the cookie \
             file is stale"
                .to_string(),
        ));
    }

    let task_id = workspace.task_id().clone();

    if files.len() == 1 {
        let name = base_name(&files[0])?;
        if is_media_file(name) {
            info!(task_id = %task_id, filename = name, "serving single media file directly");
            return Ok(Artifact {
                task_id,
                filename: name.to_string(),
                is_archive: false,
            });
        }
    }

    let archive_name = format!("yt_downloads_{}.zip", task_id.archive_prefix());
    let archive_path = root.archive_path(&archive_name);

    if let Err(e) = build_archive(&archive_path, &files) {
        // Leave no partial archive behind; the caller deletes the workspace
        if let Err(remove_err) = std::fs::remove_file(&archive_path) {
            if remove_err.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    archive = %archive_path.display(),
                    error = %remove_err,
                    "failed to remove partial archive"
                );
            }
        }
        return Err(e);
    }

    info!(
        task_id = %task_id,
        archive = archive_name,
        entries = files.len(),
        "workspace packaged into archive"
    );

    Ok(Artifact {
        task_id,
        filename: archive_name,
        is_archive: true,
    })
}

/// Write every file into a deflate zip, flattened to base filenames
fn build_archive(archive_path: &Path, files: &[PathBuf]) -> Result<()> {
    debug!(archive = %archive_path.display(), entries = files.len(), "building archive");

    let file = std::fs::File::create(archive_path).map_err(|e| {
        Error::Storage(format!(
            "failed to create archive {}: {}",
            archive_path.display(),
            e
        ))
    })?;
    let mut archive = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in files {
        let name = base_name(path)?;
        archive
            .start_file(name, options)
            .map_err(|e| Error::Storage(format!("failed to add {} to archive: {}", name, e)))?;

        let mut source = std::fs::File::open(path).map_err(|e| {
            Error::Storage(format!("failed to open {}: {}", path.display(), e))
        })?;
        std::io::copy(&mut source, &mut archive).map_err(|e| {
            Error::Storage(format!("failed to write {} into archive: {}", name, e))
        })?;
    }

    archive
        .finish()
        .map_err(|e| Error::Storage(format!("failed to finish archive: {}", e)))?;
    Ok(())
}
