//! Response bodies returned by the conversion endpoints.

use serde::Serialize;

/// Successful conversion result.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResponse {
    /// Always `true` on the success path; failures go through the error
    /// envelope instead.
    pub success: bool,

    /// The converted document as Markdown text.
    pub markdown: String,

    /// Original filename of the source document, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Source URL, present only for URL conversions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ConvertResponse {
    pub fn new(markdown: String, filename: Option<String>, url: Option<String>) -> Self {
        Self {
            success: true,
            markdown,
            filename,
            url,
        }
    }
}

/// Body of `GET /api/v1/supported-formats`.
#[derive(Debug, Clone, Serialize)]
pub struct SupportedFormatsResponse {
    /// Accepted file extensions, dotted and lowercase (e.g. `.pdf`).
    pub formats: Vec<String>,

    /// Maximum accepted upload size in bytes.
    pub max_file_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_optionals_are_omitted_from_json() {
        let resp = ConvertResponse::new("# hi".into(), Some("a.pdf".into()), None);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"filename\":\"a.pdf\""));
        assert!(!json.contains("url"));
    }
}
