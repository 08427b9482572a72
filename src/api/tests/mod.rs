use super::*;
use crate::downloader::test_helpers::create_test_downloader;
use crate::extractor::MediaExtractor;
use crate::extractor::testing::{Script, ScriptedExtractor};
use crate::lyrics::LyricProvider;
use crate::lyrics::testing::StaticLyrics;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;

mod submit;
mod system;

/// Helper to build a router backed by scripted collaborators
async fn test_app(
    extractor: Box<dyn MediaExtractor>,
    lyrics: Box<dyn LyricProvider>,
) -> (Router, Arc<BatchDownloader>, TempDir) {
    let (downloader, temp) = create_test_downloader(extractor, lyrics).await;
    let downloader = Arc::new(downloader);
    let config = downloader.config.clone();
    let app = create_router(downloader.clone(), config);
    (app, downloader, temp)
}

/// Percent-encode a download reference so it parses as a request URI
fn encode_reference(reference: &str) -> String {
    reference
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// POST a batch request and return (status, parsed JSON body)
async fn submit(
    app: &Router,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/download")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

/// Count workspace directories under the downloader's storage root
fn workspace_count(downloader: &BatchDownloader) -> usize {
    std::fs::read_dir(downloader.storage().path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .count()
}
