//! Media extraction
//!
//! This module provides a trait-based architecture for the external
//! media-extraction collaborator. The production implementation drives the
//! `yt-dlp` binary; tests substitute scripted implementations.
//!
//! ## Architecture
//!
//! The core abstraction is the [`MediaExtractor`] trait: given an immutable
//! per-batch [`ExtractionSession`] and one URL, an implementation downloads
//! zero or more media files into the session's workspace and reports the
//! resolved display titles. One session is opened per batch and shared across
//! every URL in it; URLs are processed one at a time because the underlying
//! collaborator is not assumed safe for concurrent use.

mod traits;
mod ytdlp;

pub use traits::{ExtractedItem, MediaExtractor};
pub use ytdlp::YtDlpExtractor;

use crate::config::ExtractionConfig;
use crate::types::MediaKind;
use crate::workspace::Workspace;
use std::path::PathBuf;

/// Immutable per-batch extraction configuration
///
/// Constructed once when a batch starts and never mutated mid-batch. Carries
/// everything an extractor needs to place output files and shape upstream
/// requests: the workspace, the media kind (fixed at session-open time, not
/// per item), the browser-like User-Agent, and the cookie file, which is
/// consulted only if it actually exists on disk.
#[derive(Clone, Debug)]
pub struct ExtractionSession {
    workspace_dir: PathBuf,
    kind: MediaKind,
    user_agent: String,
    cookie_file: Option<PathBuf>,
    expand_playlists: bool,
    audio_bitrate: u32,
}

impl ExtractionSession {
    /// Open a session for one batch
    pub fn open(config: &ExtractionConfig, workspace: &Workspace, kind: MediaKind) -> Self {
        let cookie_file = config
            .cookie_file
            .is_file()
            .then(|| config.cookie_file.clone());

        Self {
            workspace_dir: workspace.path().to_path_buf(),
            kind,
            user_agent: config.user_agent.clone(),
            cookie_file,
            expand_playlists: config.expand_playlists,
            audio_bitrate: config.audio_bitrate,
        }
    }

    /// Directory the extractor writes into
    pub fn workspace_dir(&self) -> &PathBuf {
        &self.workspace_dir
    }

    /// Media kind for every URL in this batch
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// User-Agent attached to outbound requests
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Cookie file, present only when it exists on disk
    pub fn cookie_file(&self) -> Option<&PathBuf> {
        self.cookie_file.as_ref()
    }

    /// Whether playlist URLs expand into their entries
    pub fn expand_playlists(&self) -> bool {
        self.expand_playlists
    }

    /// Target bitrate in kbps for audio transcoding
    pub fn audio_bitrate(&self) -> u32 {
        self.audio_bitrate
    }

    /// Output template placing files in the workspace, named by title
    pub fn output_template(&self) -> String {
        format!("{}/%(title)s.%(ext)s", self.workspace_dir.display())
    }
}

// Scripted extractors shared by the retriever, downloader, and API tests
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::{Error, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// What a [`ScriptedExtractor`] does when asked to fetch one URL
    #[derive(Clone, Debug)]
    pub(crate) enum Script {
        /// Write one file per (title, from_playlist) pair and report it
        Deliver(Vec<(&'static str, bool)>),
        /// Fail this URL with an extraction error
        Fail(&'static str),
    }

    /// Test extractor that plays back a per-URL script
    pub(crate) struct ScriptedExtractor {
        scripts: HashMap<String, Script>,
    }

    impl ScriptedExtractor {
        pub(crate) fn new(scripts: impl IntoIterator<Item = (&'static str, Script)>) -> Self {
            Self {
                scripts: scripts
                    .into_iter()
                    .map(|(url, script)| (url.to_string(), script))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl MediaExtractor for ScriptedExtractor {
        async fn prepare(&self, _session: &ExtractionSession) -> Result<()> {
            Ok(())
        }

        async fn fetch(&self, session: &ExtractionSession, url: &str) -> Result<Vec<ExtractedItem>> {
            match self.scripts.get(url) {
                Some(Script::Deliver(entries)) => {
                    let mut items = Vec::new();
                    for (title, from_playlist) in entries {
                        // Real extractors sanitize output names themselves
                        let filename = format!(
                            "{}.{}",
                            crate::utils::sanitize_filename(title),
                            session.kind().extension()
                        );
                        let path = session.workspace_dir().join(&filename);
                        tokio::fs::write(&path, b"media-bytes").await.unwrap();
                        items.push(ExtractedItem {
                            title: (*title).to_string(),
                            path,
                            from_playlist: *from_playlist,
                        });
                    }
                    Ok(items)
                }
                Some(Script::Fail(message)) => {
                    Err(Error::ExternalTool((*message).to_string()))
                }
                None => Err(Error::ExternalTool(format!("no script for {url}"))),
            }
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    /// Test extractor whose session can never be opened
    pub(crate) struct UnavailableExtractor;

    #[async_trait]
    impl MediaExtractor for UnavailableExtractor {
        async fn prepare(&self, _session: &ExtractionSession) -> Result<()> {
            Err(Error::ExternalTool("extraction binary not found".into()))
        }

        async fn fetch(
            &self,
            _session: &ExtractionSession,
            _url: &str,
        ) -> Result<Vec<ExtractedItem>> {
            Err(Error::ExternalTool("extraction binary not found".into()))
        }

        fn name(&self) -> &'static str {
            "unavailable"
        }
    }
}
