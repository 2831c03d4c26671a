use crate::engine::EngineError;
use crate::services::convert_service::ConvertError;
use crate::services::download::DownloadError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// A lightweight wrapper for general errors that keeps the message local.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 400 Bad Request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "status": self.status.as_u16()
        }));

        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err.to_string())
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        let status = match &err {
            ConvertError::UnsupportedFormat { .. } | ConvertError::MissingFile => {
                StatusCode::BAD_REQUEST
            }
            ConvertError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ConvertError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ConvertError::Engine(EngineError::EmptyDocument) => StatusCode::UNPROCESSABLE_ENTITY,
            ConvertError::Engine(_) | ConvertError::Io(_) | ConvertError::Canceled => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ConvertError::Download(inner) => return inner_download_status(inner, err.to_string()),
        };
        AppError::new(status, err.to_string())
    }
}

impl From<DownloadError> for AppError {
    fn from(err: DownloadError) -> Self {
        inner_download_status(&err, err.to_string())
    }
}

fn inner_download_status(err: &DownloadError, message: String) -> AppError {
    let status = match err {
        DownloadError::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
        DownloadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        DownloadError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        DownloadError::UpstreamStatus { .. } | DownloadError::Request(_) => StatusCode::BAD_GATEWAY,
    };
    AppError::new(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_maps_to_400() {
        let err = ConvertError::UnsupportedFormat {
            extension: ".exe".into(),
            supported: ".pdf,.html".into(),
        };
        assert_eq!(AppError::from(err).status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn oversized_payload_maps_to_413() {
        let err = ConvertError::FileTooLarge {
            size: 200,
            limit: 100,
        };
        assert_eq!(AppError::from(err).status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn download_timeout_maps_to_504_through_convert_error() {
        let err = ConvertError::Download(DownloadError::Timeout { secs: 30 });
        assert_eq!(AppError::from(err).status, StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn upstream_failure_maps_to_502() {
        let err = DownloadError::UpstreamStatus { status: 404 };
        assert_eq!(AppError::from(err).status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn empty_document_maps_to_422() {
        let err = ConvertError::Engine(EngineError::EmptyDocument);
        assert_eq!(AppError::from(err).status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
