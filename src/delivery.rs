//! One-shot artifact delivery
//!
//! Maps a download reference (task id + filename) back to a concrete path,
//! opens it for streaming, and guarantees that the file and its owning
//! workspace are deleted once the response body is done, whether it was a
//! full stream or a client abort. The deletion rides on a drop guard
//! owned by the body stream, so every exit path triggers it exactly once.
//!
//! A reference is single-use by construction: the first delivery removes the
//! backing storage, so a replay resolves to a missing path and answers
//! "not found or expired".

use crate::error::{Error, Result};
use crate::workspace::StorageRoot;
use axum::body::Bytes;
use futures::Stream;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

/// An artifact opened for its one delivery
pub struct Delivery {
    /// Body stream; dropping it (fully read or not) deletes the artifact
    pub stream: DeliveryStream,
    /// Size of the file in bytes, for the Content-Length header
    pub size: u64,
    /// Attachment filename shown to the client
    pub filename: String,
}

/// Reject path segments that could escape the storage root
///
/// Task ids and filenames arrive as URL path segments; anything that smells
/// like traversal resolves to "not found" rather than to a path.
fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains('/')
        && !segment.contains('\\')
        && !segment.contains('\0')
}

/// Open an artifact for delivery
///
/// Archive filenames resolve against the storage root; anything else resolves
/// inside the task's workspace.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when the reference does not resolve to an
/// existing file: never existed, already consumed, or malformed.
pub async fn open_delivery(
    root: &StorageRoot,
    task_id: &str,
    filename: &str,
) -> Result<Delivery> {
    if !is_safe_segment(task_id) || !is_safe_segment(filename) {
        return Err(Error::NotFound("file not found or expired".to_string()));
    }

    let workspace_dir = root.workspace_path(task_id);
    let file_path = if filename.ends_with(".zip") {
        root.archive_path(filename)
    } else {
        workspace_dir.join(filename)
    };

    let file = match tokio::fs::File::open(&file_path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NotFound("file not found or expired".to_string()));
        }
        Err(e) => return Err(Error::Io(e)),
    };

    let size = file.metadata().await?.len();
    debug!(task_id, filename, size, "delivery opened");

    Ok(Delivery {
        stream: DeliveryStream {
            inner: ReaderStream::new(file),
            _guard: CleanupGuard {
                file_path,
                workspace_dir,
            },
        },
        size,
        filename: filename.to_string(),
    })
}

/// File byte stream that deletes its backing storage when dropped
pub struct DeliveryStream {
    // Field order matters: `inner` drops first, closing the file handle
    // before the guard unlinks it.
    inner: ReaderStream<tokio::fs::File>,
    _guard: CleanupGuard,
}

impl Stream for DeliveryStream {
    type Item = std::io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().inner).poll_next(cx)
    }
}

/// Deletes the delivered file and its owning workspace on drop
///
/// Runs whether the stream was fully consumed, partially consumed, or never
/// polled. Failures are logged, never surfaced; the response has already
/// been sent by the time this runs.
struct CleanupGuard {
    file_path: PathBuf,
    workspace_dir: PathBuf,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.file_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    path = %self.file_path.display(),
                    error = %e,
                    "failed to delete delivered file"
                );
            }
        }
        if let Err(e) = std::fs::remove_dir_all(&self.workspace_dir) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    path = %self.workspace_dir.display(),
                    error = %e,
                    "failed to delete workspace after delivery"
                );
            }
        }
        debug!(
            file = %self.file_path.display(),
            workspace = %self.workspace_dir.display(),
            "post-delivery cleanup ran"
        );
    }
}
