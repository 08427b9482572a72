use super::*;
use serde_json::json;

#[tokio::test]
async fn submit_single_url_returns_success_with_download_reference() {
    let (app, _downloader, _temp) = test_app(
        Box::new(ScriptedExtractor::new([(
            "https://valid.example/a",
            Script::Deliver(vec![("Song A", false)]),
        )])),
        Box::new(StaticLyrics::new([])),
    )
    .await;

    let (status, body) = submit(
        &app,
        json!({"urls": "https://valid.example/a", "format": "mp3"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let reference = body["download_url"].as_str().unwrap();
    assert!(reference.starts_with("/get-file/"));
    assert!(reference.ends_with("/Song A.mp3"));
}

#[tokio::test]
async fn submit_with_no_urls_is_a_validation_error() {
    let (app, downloader, _temp) = test_app(
        Box::new(ScriptedExtractor::new([])),
        Box::new(StaticLyrics::new([])),
    )
    .await;

    let (status, body) = submit(&app, json!({"urls": "   \n  ", "format": "mp3"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("at least one URL required")
    );
    // Rejected before any directory was created
    assert_eq!(workspace_count(&downloader), 0);
}

#[tokio::test]
async fn submit_with_unknown_format_is_rejected() {
    let (app, _downloader, _temp) = test_app(
        Box::new(ScriptedExtractor::new([])),
        Box::new(StaticLyrics::new([])),
    )
    .await;

    let (status, body) = submit(
        &app,
        json!({"urls": "https://valid.example/a", "format": "flac"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn submit_where_every_url_fails_answers_bad_gateway() {
    let (app, downloader, _temp) = test_app(
        Box::new(ScriptedExtractor::new([
            ("https://bad.example/a", Script::Fail("blocked")),
            ("https://bad.example/b", Script::Fail("blocked")),
        ])),
        Box::new(StaticLyrics::new([])),
    )
    .await;

    let (status, body) = submit(
        &app,
        json!({
            "urls": "https://bad.example/a\nhttps://bad.example/b",
            "format": "mp3"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "retrieval_failed");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("blocking")
    );
    assert_eq!(workspace_count(&downloader), 0);
}

#[tokio::test]
async fn submit_with_lyrics_issues_archive_reference() {
    let (app, _downloader, _temp) = test_app(
        Box::new(ScriptedExtractor::new([(
            "https://valid.example/a",
            Script::Deliver(vec![("Song A", false)]),
        )])),
        Box::new(StaticLyrics::new([("Song A", "[00:01.00] line")])),
    )
    .await;

    let (status, body) = submit(
        &app,
        json!({
            "urls": "https://valid.example/a",
            "format": "mp3",
            "lyrics": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let reference = body["download_url"].as_str().unwrap();
    assert!(reference.contains("/yt_downloads_"));
    assert!(reference.ends_with(".zip"));
}

#[tokio::test]
async fn submit_playlist_batch_archives_every_entry() {
    let (app, downloader, _temp) = test_app(
        Box::new(ScriptedExtractor::new([(
            "https://valid.example/playlist",
            Script::Deliver(vec![("Track 1", true), ("Track 2", true)]),
        )])),
        Box::new(StaticLyrics::new([])),
    )
    .await;

    let (status, body) = submit(
        &app,
        json!({"urls": "https://valid.example/playlist", "format": "mp4"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let reference = body["download_url"].as_str().unwrap().to_string();
    let archive_name = reference.rsplit('/').next().unwrap();

    let archive_path = downloader.storage().archive_path(archive_name);
    let file = std::fs::File::open(archive_path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Track 1.mp4", "Track 2.mp4"]);
}
