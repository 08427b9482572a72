//! Batch retrieval
//!
//! Iterates the normalized URL list sequentially through one extraction
//! session, isolating per-URL failures so one bad URL never aborts the batch,
//! and best-effort fetching lyrics for each standalone retrieved item. The
//! populated workspace is the output; the caller inspects its file listing
//! afterwards.

use crate::extractor::{ExtractionSession, MediaExtractor};
use crate::lyrics::LyricProvider;
use crate::utils::sanitize_filename;
use crate::workspace::Workspace;
use tracing::{debug, info, warn};

/// Normalize the raw multi-line URL input
///
/// Splits on line breaks, trims surrounding whitespace, and drops empty
/// lines. An empty result means the request carries no usable URL and must be
/// rejected before any workspace or session is created.
#[must_use]
pub fn normalize_urls(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Run the batch loop over normalized URLs
///
/// URLs are processed one at a time; the extraction collaborator is not
/// assumed safe for concurrent use, and upstream services rate-limit bursts.
/// Any failure scoped to a single URL or a single lyric lookup is logged and
/// absorbed; the loop always runs to the end of the list.
pub async fn run_batch(
    extractor: &dyn MediaExtractor,
    lyrics: Option<&dyn LyricProvider>,
    session: &ExtractionSession,
    workspace: &Workspace,
    urls: &[String],
) {
    let mut retrieved = 0usize;

    for url in urls {
        let items = match extractor.fetch(session, url).await {
            Ok(items) => items,
            Err(e) => {
                warn!(url, error = %e, "skipping URL after extraction failure");
                continue;
            }
        };

        retrieved += items.len();

        for item in &items {
            debug!(title = %item.title, path = %item.path.display(), "retrieved item");

            // Lyric matching applies to standalone items only; playlist
            // expansions are served as-is.
            if item.from_playlist || item.title.is_empty() {
                continue;
            }
            if let Some(provider) = lyrics {
                write_lyric_file(provider, workspace, &item.title).await;
            }
        }
    }

    info!(
        urls = urls.len(),
        retrieved,
        workspace = %workspace.path().display(),
        "batch retrieval finished"
    );
}

/// Search for lyrics by title and write `<title>.lrc` into the workspace
///
/// Strictly best-effort: a miss, a provider failure, and a write failure all
/// end the same way, with a log line and nothing else.
async fn write_lyric_file(provider: &dyn LyricProvider, workspace: &Workspace, title: &str) {
    debug!(title, provider = provider.name(), "searching lyrics");

    let lyrics = match provider.search(title).await {
        Ok(Some(lyrics)) => lyrics,
        Ok(None) => {
            debug!(title, "no lyrics found");
            return;
        }
        Err(e) => {
            warn!(title, error = %e, "lyric search failed");
            return;
        }
    };

    let path = workspace
        .path()
        .join(format!("{}.lrc", sanitize_filename(title)));
    match tokio::fs::write(&path, lyrics).await {
        Ok(()) => debug!(title, path = %path.display(), "lyric file written"),
        Err(e) => warn!(title, error = %e, "failed to write lyric file"),
    }
}
