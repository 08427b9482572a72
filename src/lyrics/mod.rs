//! Synchronized-lyric search
//!
//! Trait-based seam for the external lyric-search collaborator. Lyric lookup
//! is strictly best-effort: a miss is `Ok(None)`, and even a hard failure is
//! absorbed by the batch loop. Lyrics can enrich a batch but never fail one.

mod lrclib;

pub use lrclib::LrclibProvider;

use async_trait::async_trait;

/// Trait for the external lyric-search collaborator
///
/// Given a display title, returns lyric text or nothing. No exact match is
/// guaranteed; providers return their best candidate.
#[async_trait]
pub trait LyricProvider: Send + Sync {
    /// Search for lyrics by display title
    ///
    /// Returns `Ok(None)` when the provider has no match. Whitespace-only
    /// results count as no match.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider could not be reached or answered
    /// with a failure. Callers treat this the same as a miss.
    async fn search(&self, title: &str) -> crate::Result<Option<String>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
