//! Core types for media-dl

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Unique identifier for a batch-download task
///
/// Generated once per submitted batch; names the task's workspace directory
/// and prefixes the archive filename when the batch is packaged as a zip.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh, globally unique task identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix used in archive filenames (`yt_downloads_<prefix>.zip`)
    ///
    /// The first 8 characters of the UUID, which for a v4 UUID are 8 hex digits.
    pub fn archive_prefix(&self) -> &str {
        &self.0[..8]
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Requested media kind for a batch
///
/// Fixed at session-open time for the whole batch: audio batches transcode to
/// mp3 at a fixed bitrate, video batches merge best video + best audio to mp4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MediaKind {
    /// Audio only, transcoded to mp3
    #[serde(rename = "mp3")]
    Audio,
    /// Video with audio, merged to mp4
    #[serde(rename = "mp4")]
    Video,
}

impl MediaKind {
    /// File extension produced for this kind
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Audio => "mp3",
            MediaKind::Video => "mp4",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// A submitted batch-download request
///
/// `urls` is a raw multi-line string exactly as the client typed it; it is
/// normalized (split, trimmed, empties dropped) by the batch retriever.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchRequest {
    /// Multi-line string of source URLs, one per line
    pub urls: String,

    /// Requested media kind ("mp3" or "mp4")
    pub format: MediaKind,

    /// Fetch synchronized lyrics for each single retrieved item
    #[serde(default)]
    pub lyrics: bool,
}

/// Descriptor for the deliverable produced by packaging a workspace
///
/// Either a direct reference to the single retrieved file, or a zip archive of
/// everything the workspace contained. Valid for at most one delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Artifact {
    /// The task that produced this artifact
    pub task_id: TaskId,

    /// Filename to serve (also the attachment name shown to the client)
    pub filename: String,

    /// Whether the artifact is a zip archive stored at the shared root
    /// rather than a file inside the task's workspace
    pub is_archive: bool,
}

impl Artifact {
    /// The opaque download reference handed back to the client
    pub fn download_path(&self) -> String {
        format!("/get-file/{}/{}", self.task_id, self.filename)
    }
}
