//! REST API server example
//!
//! This example runs media-dl with the REST API enabled, allowing control
//! via HTTP endpoints.
//!
//! After starting, you can:
//! - Submit a batch via POST http://localhost:10000/download
//! - Fetch the packaged artifact via the returned download reference
//! - View Swagger UI at http://localhost:10000/swagger-ui

use media_dl::config::ApiConfig;
use media_dl::{BatchDownloader, Config, run_with_shutdown};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Bind to the PORT environment variable if set, as hosting platforms expect
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(10000);

    let config = Config {
        api: ApiConfig {
            bind_address: SocketAddr::from(([0, 0, 0, 0], port)),
            swagger_ui: true,
            ..Default::default()
        },
        ..Default::default()
    };

    // Create downloader instance (storage root is created if absent)
    let downloader = Arc::new(BatchDownloader::new(config.clone()).await?);

    // Serve until SIGTERM/SIGINT
    run_with_shutdown(downloader, Arc::new(config)).await?;

    Ok(())
}
