//! Batch submission handler.

use crate::api::AppState;
use crate::error::{Error, ToHttpStatus};
use crate::types::BatchRequest;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// POST /download - Submit a batch of URLs
///
/// Runs the whole batch to completion before answering: extraction, optional
/// lyric search, and packaging. The response carries an opaque single-use
/// download reference.
#[utoipa::path(
    post,
    path = "/download",
    tag = "batches",
    request_body = BatchRequest,
    responses(
        (status = 200, description = "Batch packaged, single-use download reference issued"),
        (status = 400, description = "No URLs provided or malformed request body", body = crate::error::ApiError),
        (status = 502, description = "Every URL in the batch failed", body = crate::error::ApiError),
        (status = 503, description = "Extraction binary unavailable", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError)
    )
)]
pub async fn submit_batch(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let request: BatchRequest = match serde_json::from_value(payload) {
        Ok(request) => request,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {"code": "invalid_request", "message": format!("Invalid request body: {}", e)}})),
            )
                .into_response();
        }
    };

    match state.downloader.process_batch(&request).await {
        Ok(artifact) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "download_url": artifact.download_path(),
            })),
        )
            .into_response(),
        Err(e @ Error::Validation(_)) => e.into_response(),
        Err(e) => {
            tracing::error!(code = e.error_code(), error = %e, "batch failed");
            e.into_response()
        }
    }
}
