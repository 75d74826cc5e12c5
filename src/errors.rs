use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
///
/// Every variant is a caller mistake and is rendered as a 4xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The upload has no `file` part.
    NoFilePart,
    /// The `file` part was sent with an empty filename.
    NoSelectedFile,
    /// The uploaded filename does not end in `.json`.
    InvalidFileType,
    /// The uploaded content is not a JSON document.
    InvalidJson,
    /// The JSON document lacks the top-level `data` object.
    InvalidDataStructure,
    /// The multipart stream itself could not be read.
    Upload {
        /// Status reported by the multipart reader (400 or 413).
        status: StatusCode,
        /// Reader's description of the failure.
        message: String,
    },
}

impl AppError {
    /// Message placed in the `error` field of the response body.
    pub fn message(&self) -> String {
        match self {
            AppError::NoFilePart => "No file part".to_string(),
            AppError::NoSelectedFile => "No selected file".to_string(),
            AppError::InvalidFileType => "Invalid file type. Please upload a JSON file.".to_string(),
            AppError::InvalidJson => "Invalid JSON file".to_string(),
            AppError::InvalidDataStructure => "Invalid data structure in JSON file".to_string(),
            AppError::Upload { message, .. } => message.clone(),
        }
    }

    /// HTTP status for the response.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Upload { status, .. } => *status,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Rendered as `{"error": <message>}` with the variant's status code.
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!("Rejected request ({}): {}", status.as_u16(), self);

        let body = Json(json!({
            "error": self.message(),
        }));

        (status, body).into_response()
    }
}

impl From<MultipartError> for AppError {
    /// Converts a multipart read failure, keeping the reader's status code.
    fn from(err: MultipartError) -> Self {
        AppError::Upload {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        for err in [
            AppError::NoFilePart,
            AppError::NoSelectedFile,
            AppError::InvalidFileType,
            AppError::InvalidJson,
            AppError::InvalidDataStructure,
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{:?}", err);
        }
    }

    #[test]
    fn test_messages_match_wire_contract() {
        assert_eq!(AppError::NoFilePart.message(), "No file part");
        assert_eq!(AppError::NoSelectedFile.message(), "No selected file");
        assert_eq!(
            AppError::InvalidFileType.message(),
            "Invalid file type. Please upload a JSON file."
        );
        assert_eq!(AppError::InvalidJson.message(), "Invalid JSON file");
        assert_eq!(
            AppError::InvalidDataStructure.message(),
            "Invalid data structure in JSON file"
        );
    }

    #[test]
    fn test_upload_error_keeps_status() {
        let err = AppError::Upload {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "length limit exceeded".to_string(),
        };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.message(), "length limit exceeded");
    }
}
