//! src/services/convert_service.rs
//!
//! ConvertService — request validation, temp-file lifecycle, and timeout
//! enforcement around the conversion engine. The service owns no document
//! parsing of its own; it writes validated payloads to a temp file and
//! hands the path to [`DocumentConverter`] on a blocking task.

use crate::config::AppConfig;
use crate::engine::{DocFormat, DocumentConverter, EngineError};
use crate::services::download::{self, DownloadError};
use bytes::Bytes;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unsupported file format `{extension}`; supported formats: {supported}")]
    UnsupportedFormat { extension: String, supported: String },
    #[error("file size {size} exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },
    #[error("request contained no file data")]
    MissingFile,
    #[error("conversion timed out after {secs}s")]
    Timeout { secs: u64 },
    #[error("conversion task was canceled")]
    Canceled,
    #[error("conversion failed: {0}")]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Download(#[from] DownloadError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Shared application state for all handlers.
#[derive(Clone)]
pub struct ConvertService {
    cfg: Arc<AppConfig>,
    engine: Arc<DocumentConverter>,
    http: reqwest::Client,
}

impl ConvertService {
    pub fn new(cfg: Arc<AppConfig>) -> Self {
        Self {
            cfg,
            engine: Arc::new(DocumentConverter::new()),
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.cfg
    }

    /// Validate a filename against the configured allow-list and resolve
    /// its conversion format.
    pub fn resolve_format(&self, filename: &str) -> ConvertResult<DocFormat> {
        let extension = extension_of(filename);
        let unsupported = || ConvertError::UnsupportedFormat {
            extension: extension.clone(),
            supported: self.cfg.extensions_csv(),
        };

        if !self.cfg.supported_extensions.contains(&extension) {
            return Err(unsupported());
        }
        // The allow-list is operator-configurable, so an allowed extension
        // may still have no engine backend.
        DocFormat::from_extension(&extension).ok_or_else(unsupported)
    }

    /// Convert an in-memory payload: validate, spill to a temp file, run
    /// the engine on a blocking task under the configured timeout.
    pub async fn convert_bytes(&self, payload: Bytes, filename: &str) -> ConvertResult<String> {
        let format = self.resolve_format(filename)?;

        if payload.is_empty() {
            return Err(ConvertError::MissingFile);
        }
        let size = payload.len() as u64;
        if size > self.cfg.max_file_size {
            return Err(ConvertError::FileTooLarge {
                size,
                limit: self.cfg.max_file_size,
            });
        }

        debug!(%filename, size, ?format, "starting conversion");
        let started = Instant::now();

        let engine = self.engine.clone();
        let temp_dir = self.cfg.temp_dir.clone();
        let suffix = extension_of(filename);
        let task = tokio::task::spawn_blocking(move || -> ConvertResult<String> {
            // NamedTempFile removes itself on drop, including the error paths.
            let mut tmp = tempfile::Builder::new()
                .suffix(&suffix)
                .tempfile_in(&temp_dir)?;
            tmp.write_all(&payload)?;
            tmp.flush()?;
            Ok(engine.convert(tmp.path(), format)?)
        });

        let secs = self.cfg.convert_timeout_secs;
        let markdown = match tokio::time::timeout(self.cfg.convert_timeout(), task).await {
            // The blocking task cannot be interrupted; it is detached and
            // finishes (and cleans its temp file) in the background.
            Err(_) => {
                warn!(%filename, secs, "conversion timed out");
                return Err(ConvertError::Timeout { secs });
            }
            Ok(Err(join_err)) => {
                warn!(%filename, error = %join_err, "conversion task failed to complete");
                return Err(ConvertError::Canceled);
            }
            Ok(Ok(result)) => result?,
        };

        info!(
            %filename,
            size,
            markdown_len = markdown.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "conversion complete"
        );
        Ok(markdown)
    }

    /// Download a document and convert it. Returns the Markdown plus the
    /// filename inferred for the download.
    pub async fn convert_url(&self, url: &str) -> ConvertResult<(String, String)> {
        let downloaded = download::fetch(&self.http, &self.cfg, url).await?;
        let markdown = self
            .convert_bytes(downloaded.bytes, &downloaded.filename)
            .await?;
        Ok((markdown, downloaded.filename))
    }
}

/// Lowercased dotted extension of `filename`, or an empty string.
fn extension_of(filename: &str) -> String {
    match filename.rfind('.') {
        Some(idx) => filename[idx..].to_ascii_lowercase(),
        None => String::new(),
    }
}
