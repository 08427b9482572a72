//! LRCLIB-backed lyric provider

use super::LyricProvider;
use crate::config::LyricsConfig;
use crate::error::Error;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// One record from the LRCLIB search endpoint
///
/// Only the lyric payloads matter here; the rest of the record (track name,
/// artist, duration) is ignored.
#[derive(Debug, Deserialize)]
struct SearchRecord {
    #[serde(rename = "syncedLyrics")]
    synced_lyrics: Option<String>,
    #[serde(rename = "plainLyrics")]
    plain_lyrics: Option<String>,
}

/// Lyric provider querying an LRCLIB-compatible search API
///
/// Issues `GET <base>/api/search?q=<title>` and picks the first record
/// carrying synchronized lyrics, falling back to plain lyrics when no record
/// has synced ones.
///
/// # Examples
///
/// ```no_run
/// use media_dl::lyrics::{LrclibProvider, LyricProvider};
/// use media_dl::config::LyricsConfig;
///
/// # async fn example() -> media_dl::Result<()> {
/// let provider = LrclibProvider::new(&LyricsConfig::default())?;
/// if let Some(lyrics) = provider.search("Song A").await? {
///     println!("{lyrics}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LrclibProvider {
    client: reqwest::Client,
    search_url: Url,
}

impl LrclibProvider {
    /// Create a provider from the lyric-search configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the configured base URL does not parse,
    /// and `Error::Network` if the HTTP client cannot be built.
    pub fn new(config: &LyricsConfig) -> crate::Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            Error::Validation(format!("invalid lyrics base URL {}: {}", config.base_url, e))
        })?;
        let search_url = base.join("/api/search").map_err(|e| {
            Error::Validation(format!("invalid lyrics base URL {}: {}", config.base_url, e))
        })?;

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, search_url })
    }
}

fn non_empty(lyrics: Option<String>) -> Option<String> {
    lyrics.filter(|text| !text.trim().is_empty())
}

#[async_trait]
impl LyricProvider for LrclibProvider {
    async fn search(&self, title: &str) -> crate::Result<Option<String>> {
        let response = self
            .client
            .get(self.search_url.clone())
            .query(&[("q", title)])
            .send()
            .await?
            .error_for_status()?;

        let records: Vec<SearchRecord> = response.json().await?;
        debug!(title, candidates = records.len(), "lyric search answered");

        // Synced lyrics from any record beat plain lyrics from the first
        let synced = records
            .iter()
            .find_map(|r| non_empty(r.synced_lyrics.clone()));
        if synced.is_some() {
            return Ok(synced);
        }

        Ok(records
            .into_iter()
            .find_map(|r| non_empty(r.plain_lyrics)))
    }

    fn name(&self) -> &'static str {
        "lrclib"
    }
}
