//! Basic batch example
//!
//! Downloads one URL as mp3 with lyric search enabled and prints the
//! single-use download reference. Requires yt-dlp in PATH.

use media_dl::types::{BatchRequest, MediaKind};
use media_dl::{BatchDownloader, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let downloader = BatchDownloader::new(Config::default()).await?;

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string());

    let artifact = downloader
        .process_batch(&BatchRequest {
            urls: url,
            format: MediaKind::Audio,
            lyrics: true,
        })
        .await?;

    println!("artifact: {}", artifact.filename);
    println!("archive: {}", artifact.is_archive);
    println!("reference: {}", artifact.download_path());
    println!("note: the reference is valid for exactly one download");

    Ok(())
}
