//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the media-dl REST API
//! using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the media-dl REST API
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation (if enabled)
#[derive(OpenApi)]
#[openapi(
    info(
        title = "media-dl REST API",
        version = "0.2.0",
        description = "Batch media download service: submit a list of URLs, receive a single-use download reference for the packaged result",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:10000", description = "Local development server")
    ),
    paths(
        // Batches
        crate::api::routes::submit_batch,

        // Files
        crate::api::routes::fetch_artifact,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(
        schemas(
            crate::types::BatchRequest,
            crate::types::MediaKind,
            crate::types::Artifact,
            crate::types::TaskId,
            crate::error::ApiError,
            crate::error::ErrorDetail,
        )
    ),
    tags(
        (name = "batches", description = "Batch submission"),
        (name = "files", description = "One-shot artifact delivery"),
        (name = "system", description = "Health and documentation")
    )
)]
pub struct ApiDoc;
