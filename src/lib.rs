//! # media-dl
//!
//! Backend library for batch media-download services: accept a list of media
//! URLs, retrieve audio or video through an external extraction binary,
//! optionally attach synchronized lyrics, package the result as a single file
//! or a zip archive, and serve it for exactly one download before cleanup.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Failure isolation** - One bad URL never spoils the batch
//! - **Zero residue** - Per-task storage returns to zero after one delivery
//! - **Pluggable collaborators** - Extraction and lyric search sit behind traits
//!
//! ## Quick Start
//!
//! ```no_run
//! use media_dl::{BatchDownloader, Config};
//! use media_dl::types::{BatchRequest, MediaKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let downloader = BatchDownloader::new(Config::default()).await?;
//!
//!     let artifact = downloader
//!         .process_batch(&BatchRequest {
//!             urls: "https://example.com/watch?v=abc".to_string(),
//!             format: MediaKind::Audio,
//!             lyrics: true,
//!         })
//!         .await?;
//!
//!     // Hand this reference to the client; it is valid for one download
//!     println!("{}", artifact.download_path());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// One-shot artifact delivery
pub mod delivery;
/// Batch download orchestration
pub mod downloader;
/// Error types
pub mod error;
/// Media extraction
pub mod extractor;
/// Lyric search
pub mod lyrics;
/// Workspace packaging
pub mod packager;
/// Batch retrieval loop
pub mod retriever;
/// Core types
pub mod types;
/// Filename utilities
pub mod utils;
/// Per-task workspace lifecycle
pub mod workspace;

// Re-export commonly used types
pub use config::Config;
pub use delivery::{Delivery, DeliveryStream};
pub use downloader::BatchDownloader;
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use extractor::{ExtractedItem, ExtractionSession, MediaExtractor, YtDlpExtractor};
pub use lyrics::{LrclibProvider, LyricProvider};
pub use types::{Artifact, BatchRequest, MediaKind, TaskId};
pub use workspace::{StorageRoot, Workspace};

use std::sync::Arc;

/// Run the API server until a termination signal arrives.
///
/// Serves the REST API on the configured bind address and returns once the
/// process receives a termination signal.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use media_dl::{BatchDownloader, Config, run_with_shutdown};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Arc::new(Config::default());
///     let downloader = Arc::new(BatchDownloader::new((*config).clone()).await?);
///
///     run_with_shutdown(downloader, config).await?;
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(
    downloader: Arc<BatchDownloader>,
    config: Arc<Config>,
) -> Result<()> {
    tokio::select! {
        result = api::start_api_server(downloader, config) => result,
        () = wait_for_signal() => {
            tracing::info!("Shutting down");
            Ok(())
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
