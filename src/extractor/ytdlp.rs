//! CLI-based media extractor using the external yt-dlp binary

use super::traits::{ExtractedItem, MediaExtractor};
use super::ExtractionSession;
use crate::config::ExtractionConfig;
use crate::error::Error;
use crate::types::MediaKind;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

/// Field separator for `--print` output lines
///
/// ASCII unit separator: cannot survive into a title or a filesystem path, so
/// the three printed fields split unambiguously.
const PRINT_SEPARATOR: char = '\u{1f}';

/// Media extractor driving the external `yt-dlp` binary
///
/// One `yt-dlp` process is spawned per URL; the arguments are derived from
/// the batch's [`ExtractionSession`] and therefore identical for every URL in
/// the batch. Format selection happens once at session level: audio sessions
/// transcode to mp3 at the configured bitrate, video sessions merge best
/// video + best audio into mp4.
///
/// # Examples
///
/// ```no_run
/// use media_dl::extractor::YtDlpExtractor;
/// use media_dl::config::ExtractionConfig;
///
/// // Auto-discover from PATH, honoring an explicit configured path first
/// let extractor = YtDlpExtractor::new(ExtractionConfig::default());
/// ```
pub struct YtDlpExtractor {
    binary_path: Option<PathBuf>,
}

impl YtDlpExtractor {
    /// Create an extractor from the extraction configuration
    ///
    /// An explicitly configured `ytdlp_path` wins; otherwise the `yt-dlp`
    /// binary is searched for in PATH. A missing binary is not an error
    /// here; it becomes a session-open failure when the first batch arrives.
    pub fn new(config: ExtractionConfig) -> Self {
        let binary_path = config.ytdlp_path.or_else(Self::discover);
        Self { binary_path }
    }

    /// Create an extractor with an explicit binary path
    pub fn with_binary(binary_path: PathBuf) -> Self {
        Self {
            binary_path: Some(binary_path),
        }
    }

    /// Attempt to find yt-dlp in PATH
    fn discover() -> Option<PathBuf> {
        which::which("yt-dlp").ok()
    }

    fn binary(&self) -> crate::Result<&PathBuf> {
        self.binary_path.as_ref().ok_or_else(|| {
            Error::ExternalTool(
                "yt-dlp not found in PATH; install it or set extraction.ytdlp_path".to_string(),
            )
        })
    }
}

/// Assemble the full argument list for one URL
fn build_args(session: &ExtractionSession, url: &str) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--no-warnings".into(),
        "--newline".into(),
        // Non-fatal per-entry errors inside playlists are suppressed at the
        // tool level; the batch loop handles whole-URL failures.
        "--ignore-errors".into(),
    ];

    if session.expand_playlists() {
        args.push("--yes-playlist".into());
    } else {
        args.push("--no-playlist".into());
    }

    args.push("--user-agent".into());
    args.push(session.user_agent().into());

    if let Some(cookie_file) = session.cookie_file() {
        args.push("--cookies".into());
        args.push(cookie_file.into());
    }

    args.push("--print".into());
    args.push(
        format!(
            "after_move:%(playlist_id|)s{PRINT_SEPARATOR}%(title)s{PRINT_SEPARATOR}%(filepath)s"
        )
        .into(),
    );

    args.push("-o".into());
    args.push(session.output_template().into());

    match session.kind() {
        MediaKind::Audio => {
            args.push("-f".into());
            args.push("bestaudio/best".into());
            args.push("-x".into());
            args.push("--audio-format".into());
            args.push("mp3".into());
            args.push("--audio-quality".into());
            args.push(format!("{}K", session.audio_bitrate()).into());
        }
        MediaKind::Video => {
            args.push("-f".into());
            args.push("bestvideo+bestaudio/best".into());
            args.push("--merge-output-format".into());
            args.push("mp4".into());
        }
    }

    args.push("--".into());
    args.push(url.into());
    args
}

/// Parse `--print after_move:` lines into extracted items
///
/// Each completed entry prints one line of three separator-joined fields:
/// playlist id (empty for standalone videos), title, final file path. Lines
/// that do not match (stray tool output) are skipped.
fn parse_print_output(stdout: &str) -> Vec<ExtractedItem> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut fields = line.splitn(3, PRINT_SEPARATOR);
            let playlist_id = fields.next()?;
            let title = fields.next()?;
            let filepath = fields.next()?;
            Some(ExtractedItem {
                title: title.to_string(),
                path: PathBuf::from(filepath),
                from_playlist: !playlist_id.is_empty(),
            })
        })
        .collect()
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    async fn prepare(&self, session: &ExtractionSession) -> crate::Result<()> {
        let binary = self.binary()?;
        debug!(
            binary = %binary.display(),
            kind = %session.kind(),
            cookies = session.cookie_file().is_some(),
            "extraction session ready"
        );
        Ok(())
    }

    async fn fetch(
        &self,
        session: &ExtractionSession,
        url: &str,
    ) -> crate::Result<Vec<ExtractedItem>> {
        let binary = self.binary()?;
        let args = build_args(session, url);

        debug!(url, "invoking yt-dlp");
        let output = Command::new(binary)
            .args(&args)
            .output()
            .await
            .map_err(|e| Error::ExternalTool(format!("failed to execute yt-dlp: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("yt-dlp failed")
                .to_string();
            return Err(Error::ExternalTool(message));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let items = parse_print_output(&stdout);

        info!(url, count = items.len(), "extraction complete");
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}
