//! One-shot artifact delivery handler.

use crate::api::AppState;
use crate::error::Error;
use crate::utils::attachment_content_disposition;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

fn content_type_for(filename: &str) -> &'static str {
    if filename.ends_with(".zip") {
        "application/zip"
    } else if filename.ends_with(".mp3") {
        "audio/mpeg"
    } else if filename.ends_with(".mp4") {
        "video/mp4"
    } else {
        "application/octet-stream"
    }
}

/// GET /get-file/:task_id/:filename - Fetch an artifact (single use)
///
/// Streams the file as an attachment and deletes it, together with its
/// owning workspace, once the response body finishes, whether or not the
/// client read it all. A consumed or unknown reference answers 404.
#[utoipa::path(
    get,
    path = "/get-file/{task_id}/{filename}",
    tag = "files",
    params(
        ("task_id" = String, Path, description = "Task identifier from the download reference"),
        ("filename" = String, Path, description = "Filename from the download reference")
    ),
    responses(
        (status = 200, description = "File bytes with attachment disposition"),
        (status = 404, description = "File not found or expired", body = crate::error::ApiError)
    )
)]
pub async fn fetch_artifact(
    State(state): State<AppState>,
    Path((task_id, filename)): Path<(String, String)>,
) -> Response {
    match state.downloader.open_delivery(&task_id, &filename).await {
        Ok(delivery) => {
            let headers = [
                (
                    header::CONTENT_TYPE,
                    content_type_for(&delivery.filename).to_string(),
                ),
                (header::CONTENT_LENGTH, delivery.size.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    attachment_content_disposition(&delivery.filename),
                ),
            ];
            (StatusCode::OK, headers, Body::from_stream(delivery.stream)).into_response()
        }
        Err(e @ Error::NotFound(_)) => e.into_response(),
        Err(e) => {
            tracing::error!(task_id, filename, error = %e, "delivery failed");
            e.into_response()
        }
    }
}
