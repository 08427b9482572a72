//! Batch download orchestration
//!
//! [`BatchDownloader`] is the embeddable core: it owns the storage root and
//! the two external collaborators (media extraction, lyric search) and runs
//! each submitted batch through validate → workspace → session → retrieve →
//! package. One request is handled to completion on its own execution
//! context; tasks share nothing but the storage root, through disjoint
//! subdirectories.

use crate::config::Config;
use crate::delivery::{self, Delivery};
use crate::error::{Error, Result};
use crate::extractor::{ExtractionSession, MediaExtractor, YtDlpExtractor};
use crate::lyrics::{LrclibProvider, LyricProvider};
use crate::packager::package;
use crate::retriever::{normalize_urls, run_batch};
use crate::types::{Artifact, BatchRequest, TaskId};
use crate::workspace::{StorageRoot, Workspace};
use std::sync::Arc;
use tracing::info;

/// The main batch-download orchestrator
///
/// # Example
///
/// ```no_run
/// use media_dl::{BatchDownloader, Config};
/// use media_dl::types::{BatchRequest, MediaKind};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let downloader = BatchDownloader::new(Config::default()).await?;
///
///     let artifact = downloader
///         .process_batch(&BatchRequest {
///             urls: "https://example.com/watch?v=abc".to_string(),
///             format: MediaKind::Audio,
///             lyrics: true,
///         })
///         .await?;
///
///     println!("ready at {}", artifact.download_path());
///     Ok(())
/// }
/// ```
pub struct BatchDownloader {
    /// Configuration (immutable after construction)
    pub config: Arc<Config>,
    storage: StorageRoot,
    extractor: Box<dyn MediaExtractor>,
    lyrics: Box<dyn LyricProvider>,
}

impl BatchDownloader {
    /// Create a downloader with the production collaborators
    ///
    /// Initializes the storage root (created if absent) and wires up the
    /// yt-dlp extractor and the LRCLIB lyric provider.
    pub async fn new(config: Config) -> Result<Self> {
        let extractor = Box::new(YtDlpExtractor::new(config.extraction.clone()));
        let lyrics = Box::new(LrclibProvider::new(&config.lyrics)?);
        Self::with_collaborators(config, extractor, lyrics).await
    }

    /// Create a downloader with custom collaborator implementations
    ///
    /// The seam used by tests and by embedders with their own extraction or
    /// lyric backends.
    pub async fn with_collaborators(
        config: Config,
        extractor: Box<dyn MediaExtractor>,
        lyrics: Box<dyn LyricProvider>,
    ) -> Result<Self> {
        let storage = StorageRoot::init(&config.storage.temp_root).await?;
        Ok(Self {
            config: Arc::new(config),
            storage,
            extractor,
            lyrics,
        })
    }

    /// The process-wide storage root
    pub fn storage(&self) -> &StorageRoot {
        &self.storage
    }

    /// Process one batch to completion and return its artifact
    ///
    /// Validation happens before any resource is allocated. After the
    /// workspace exists, every failure path deletes it before returning; on
    /// success it survives exactly until the artifact's one delivery.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] — no usable URL in the request
    /// - [`Error::ExternalTool`] — the extraction session could not be opened
    /// - [`Error::RetrievalFailed`] — every URL in the batch failed
    /// - [`Error::Storage`] — workspace or archive creation failed
    pub async fn process_batch(&self, request: &BatchRequest) -> Result<Artifact> {
        let urls = normalize_urls(&request.urls);
        if urls.is_empty() {
            return Err(Error::Validation("at least one URL required".to_string()));
        }

        let task_id = TaskId::generate();
        info!(
            task_id = %task_id,
            urls = urls.len(),
            format = %request.format,
            lyrics = request.lyrics,
            "batch task started"
        );

        let workspace = self.storage.create_workspace(&task_id).await?;

        let result = self.retrieve_and_package(&workspace, &urls, request).await;
        if result.is_err() {
            // The empty-batch path inside the packager has already deleted
            // the workspace; delete() is idempotent, so this covers the
            // remaining failure paths without special-casing.
            workspace.delete().await;
        }
        result
    }

    async fn retrieve_and_package(
        &self,
        workspace: &Workspace,
        urls: &[String],
        request: &BatchRequest,
    ) -> Result<Artifact> {
        let session =
            ExtractionSession::open(&self.config.extraction, workspace, request.format);
        self.extractor.prepare(&session).await?;

        let lyrics = request.lyrics.then_some(self.lyrics.as_ref());
        run_batch(self.extractor.as_ref(), lyrics, &session, workspace, urls).await;

        package(&self.storage, workspace).await
    }

    /// Open a previously issued download reference for its one delivery
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the reference never existed or has
    /// already been consumed.
    pub async fn open_delivery(&self, task_id: &str, filename: &str) -> Result<Delivery> {
        delivery::open_delivery(&self.storage, task_id, filename).await
    }
}
