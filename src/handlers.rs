use crate::errors::AppError;
use crate::models::FlagReport;
use crate::rules;
use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    http::StatusCode,
    Json,
};
use serde_json::json;

/// Name of the multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

/// Health check endpoint.
///
/// Returns the service status, version, and health information.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "credit-flags-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/analyze
///
/// Accepts a multipart upload with a `file` part holding a `.json` document
/// shaped as `{"data": {"financials": [...]}}` and returns the risk flags.
///
/// The checks run in a fixed order: a `file` part must exist, its filename
/// must be non-empty and end in `.json`, and only then is the content read
/// and parsed. A request that is not multipart at all has no `file` part.
///
/// # Returns
///
/// * `Result<Json<FlagReport>, AppError>` - The computed flags, or a 4xx error.
pub async fn analyze(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<FlagReport>, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!("Upload is not multipart: {}", rejection);
        AppError::NoFilePart
    })?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // A part without a filename parameter is a plain form value, not a file.
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };

        if filename.is_empty() {
            return Err(AppError::NoSelectedFile);
        }
        if !filename.ends_with(".json") {
            return Err(AppError::InvalidFileType);
        }

        let content = field.bytes().await?;
        tracing::info!("POST /api/analyze - file: {} ({} bytes)", filename, content.len());

        let report = rules::analyze_document(&content)?;
        tracing::debug!("Computed flags for {}: {:?}", filename, report.flags);

        return Ok(Json(report));
    }

    Err(AppError::NoFilePart)
}
