//! Request bodies accepted by the conversion endpoints.

use serde::Deserialize;

/// Body of `POST /api/v1/convert/url`.
///
/// The URL is kept as a plain string here; scheme and shape are validated
/// by the download service so the handler can return a structured error
/// instead of a generic deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct UrlConvertRequest {
    /// Address of the document to download and convert.
    pub url: String,
}
