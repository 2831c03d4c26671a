//! HTTP handlers for the conversion endpoints.
//!
//! Handlers stay thin: decode the request, call `ConvertService`, shape
//! the response. All validation and temp-file handling lives in the
//! service layer.

use crate::{
    errors::AppError,
    models::{
        request::UrlConvertRequest,
        response::{ConvertResponse, SupportedFormatsResponse},
    },
    services::convert_service::{ConvertError, ConvertService},
};
use axum::{
    Json,
    extract::{Multipart, State},
};

/// `GET /api/v1/supported-formats`
pub async fn supported_formats(
    State(service): State<ConvertService>,
) -> Json<SupportedFormatsResponse> {
    let cfg = service.config();
    Json(SupportedFormatsResponse {
        formats: cfg.supported_extensions.clone(),
        max_file_size: cfg.max_file_size,
    })
}

/// `POST /api/v1/convert/file` — multipart upload with a `file` field.
pub async fn convert_file(
    State(service): State<ConvertService>,
    mut multipart: Multipart,
) -> Result<Json<ConvertResponse>, AppError> {
    // MultipartError carries the right status: 413 for bodies past the
    // DefaultBodyLimit, 400 for malformed framing
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::new(e.status(), format!("invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::bad_request("`file` field has no filename"))?;
        let payload = field
            .bytes()
            .await
            .map_err(|e| AppError::new(e.status(), format!("failed to read upload: {}", e)))?;

        let markdown = service.convert_bytes(payload, &filename).await?;
        return Ok(Json(ConvertResponse::new(markdown, Some(filename), None)));
    }

    Err(ConvertError::MissingFile.into())
}

/// `POST /api/v1/convert/url` — download a document and convert it.
pub async fn convert_from_url(
    State(service): State<ConvertService>,
    Json(request): Json<UrlConvertRequest>,
) -> Result<Json<ConvertResponse>, AppError> {
    let (markdown, filename) = service.convert_url(&request.url).await?;
    Ok(Json(ConvertResponse::new(
        markdown,
        Some(filename),
        Some(request.url),
    )))
}
