use super::*;

#[tokio::test]
async fn health_check_reports_ok_and_version() {
    let (app, _downloader, _temp) = test_app(
        Box::new(ScriptedExtractor::new([])),
        Box::new(StaticLyrics::new([])),
    )
    .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn openapi_spec_is_served_as_json() {
    let (app, _downloader, _temp) = test_app(
        Box::new(ScriptedExtractor::new([])),
        Box::new(StaticLyrics::new([])),
    )
    .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let spec: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(spec["info"]["title"], "media-dl REST API");
    assert!(spec["paths"]["/download"].is_object());
    assert!(spec["paths"]["/get-file/{task_id}/{filename}"].is_object());
}
