//! Trait and result types for media extraction

use super::ExtractionSession;
use async_trait::async_trait;
use std::path::PathBuf;

/// One successfully retrieved media file
#[must_use]
#[derive(Debug, Clone)]
pub struct ExtractedItem {
    /// Resolved display title
    pub title: String,
    /// Where the file landed inside the workspace
    pub path: PathBuf,
    /// Whether this item came out of a playlist expansion
    ///
    /// Playlist entries are not individually lyric-matched; only standalone
    /// items are.
    pub from_playlist: bool,
}

/// Trait for the external media-extraction collaborator
///
/// Given a URL and the batch's session configuration, an implementation
/// writes zero or more media files into the session's workspace and returns
/// metadata for each. A failure for one URL must not corrupt state for
/// subsequent calls within the same session.
///
/// # Examples
///
/// ```no_run
/// use media_dl::extractor::{MediaExtractor, YtDlpExtractor, ExtractionSession};
/// use media_dl::config::ExtractionConfig;
///
/// # async fn example(session: ExtractionSession) -> media_dl::Result<()> {
/// let extractor = YtDlpExtractor::new(ExtractionConfig::default());
/// extractor.prepare(&session).await?;
/// let items = extractor.fetch(&session, "https://example.com/watch?v=abc").await?;
/// for item in items {
///     println!("retrieved {}", item.title);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Check that the collaborator can serve this session
    ///
    /// Called once per batch, before the first URL. This is the only
    /// extraction failure that aborts a batch; everything after it is
    /// absorbed per URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator is unavailable (e.g. the external
    /// binary cannot be found or executed).
    async fn prepare(&self, session: &ExtractionSession) -> crate::Result<()>;

    /// Download one URL into the session's workspace
    ///
    /// A playlist URL may produce many items; a plain URL produces one.
    ///
    /// # Errors
    ///
    /// Returns an error if this URL could not be processed. The caller treats
    /// such errors as per-item failures: logged, never propagated.
    async fn fetch(&self, session: &ExtractionSession, url: &str)
    -> crate::Result<Vec<ExtractedItem>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
