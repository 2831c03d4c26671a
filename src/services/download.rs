//! URL download for `POST /api/v1/convert/url`.
//!
//! Downloads are streamed so the size cap holds even when the upstream
//! lies about (or omits) `Content-Length`. The filename is taken from
//! `Content-Disposition` when present, else the last URL path segment.

use crate::config::AppConfig;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::header;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid URL `{url}`: only http and https are supported")]
    InvalidUrl { url: String },
    #[error("download failed: upstream returned HTTP {status}")]
    UpstreamStatus { status: u16 },
    #[error("download exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },
    #[error("download timed out after {secs}s")]
    Timeout { secs: u64 },
    #[error("download failed: {0}")]
    Request(#[from] reqwest::Error),
}

pub type DownloadResult<T> = Result<T, DownloadError>;

/// A fully downloaded document plus the filename inferred for it.
#[derive(Debug)]
pub struct Downloaded {
    pub bytes: Bytes,
    pub filename: String,
}

/// Download `url`, enforcing the configured wall-clock timeout and size cap.
pub async fn fetch(
    client: &reqwest::Client,
    cfg: &AppConfig,
    url: &str,
) -> DownloadResult<Downloaded> {
    let parsed = reqwest::Url::parse(url).map_err(|_| DownloadError::InvalidUrl {
        url: url.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(DownloadError::InvalidUrl {
            url: url.to_string(),
        });
    }

    info!(%url, "downloading document");

    let secs = cfg.download_timeout_secs;
    let map_timeout = |e: reqwest::Error| {
        if e.is_timeout() {
            DownloadError::Timeout { secs }
        } else {
            DownloadError::Request(e)
        }
    };

    let response = client
        .get(parsed.clone())
        .timeout(cfg.download_timeout())
        .send()
        .await
        .map_err(map_timeout)?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::UpstreamStatus {
            status: status.as_u16(),
        });
    }

    let limit = cfg.max_download_size;
    if let Some(announced) = response.content_length() {
        if announced > limit {
            return Err(DownloadError::TooLarge { limit });
        }
    }

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let filename = extract_filename(&parsed, disposition.as_deref());

    let mut body = BytesMut::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_timeout)?;
        if body.len() as u64 + chunk.len() as u64 > limit {
            return Err(DownloadError::TooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }

    debug!(%url, size = body.len(), %filename, "download complete");

    Ok(Downloaded {
        bytes: body.freeze(),
        filename,
    })
}

/// Infer a filename: `Content-Disposition` first, then the last URL path
/// segment, then a generic fallback.
fn extract_filename(url: &reqwest::Url, content_disposition: Option<&str>) -> String {
    if let Some(value) = content_disposition {
        if let Some(name) = disposition_filename(value) {
            return name;
        }
    }

    if let Some(segments) = url.path_segments() {
        if let Some(last) = segments.filter(|s| !s.is_empty()).last() {
            return last.to_string();
        }
    }

    "document".to_string()
}

/// Pull `filename=...` out of a `Content-Disposition` header value.
fn disposition_filename(value: &str) -> Option<String> {
    let rest = value.split_once("filename=")?.1;
    let name = rest
        .split(';')
        .next()
        .unwrap_or(rest)
        .trim()
        .trim_matches(['"', '\''])
        .trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> reqwest::Url {
        reqwest::Url::parse(s).unwrap()
    }

    #[test]
    fn filename_from_content_disposition_wins() {
        let name = extract_filename(
            &url("https://example.com/dl?id=42"),
            Some(r#"attachment; filename="report.pdf""#),
        );
        assert_eq!(name, "report.pdf");
    }

    #[test]
    fn filename_from_url_path() {
        let name = extract_filename(&url("https://example.com/files/deck.pptx"), None);
        assert_eq!(name, "deck.pptx");
    }

    #[test]
    fn filename_falls_back_to_generic() {
        let name = extract_filename(&url("https://example.com/"), None);
        assert_eq!(name, "document");
    }

    #[test]
    fn disposition_parsing_handles_quotes_and_params() {
        assert_eq!(
            disposition_filename("attachment; filename=plain.docx; size=12"),
            Some("plain.docx".into())
        );
        assert_eq!(disposition_filename("inline"), None);
        assert_eq!(disposition_filename(r#"attachment; filename="""#), None);
    }
}
