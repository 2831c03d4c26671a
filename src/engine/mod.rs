//! src/engine/mod.rs
//!
//! DocumentConverter — the boundary between the HTTP service and the
//! third-party extraction crates that do the actual parsing. Everything
//! above this module treats conversion as an opaque `path -> Markdown`
//! call; everything below delegates to `pdf-extract`, `html2md`,
//! `calamine`, or the OOXML container crates per format.

use std::io;
use std::path::Path;
use thiserror::Error;

mod html;
mod office;
mod pdf;
mod sheet;

/// Document formats the converter accepts, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Pdf,
    Docx,
    Pptx,
    Xlsx,
    Html,
}

impl DocFormat {
    /// Map a lowercase dotted extension (e.g. `.pdf`) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".pdf" => Some(Self::Pdf),
            ".docx" => Some(Self::Docx),
            ".pptx" => Some(Self::Pptx),
            ".xlsx" => Some(Self::Xlsx),
            ".html" | ".htm" => Some(Self::Html),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("spreadsheet extraction failed: {0}")]
    Spreadsheet(String),
    #[error("OOXML container is malformed: {0}")]
    Container(String),
    #[error("document part `{0}` is missing from the container")]
    MissingPart(String),
    #[error("document produced no text")]
    EmptyDocument,
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Facade over the per-format extraction backends.
///
/// Conversion is synchronous and CPU-bound; callers are expected to run it
/// on a blocking task. The struct is stateless today but kept as a type so
/// backend options (OCR, image handling) have a place to live later.
#[derive(Debug, Default)]
pub struct DocumentConverter;

impl DocumentConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert the document at `path` to Markdown.
    ///
    /// An output that is empty after trimming is reported as
    /// [`EngineError::EmptyDocument`] rather than returned as a blank
    /// "success".
    pub fn convert(&self, path: &Path, format: DocFormat) -> EngineResult<String> {
        let markdown = match format {
            DocFormat::Pdf => pdf::to_markdown(path)?,
            DocFormat::Html => html::to_markdown(path)?,
            DocFormat::Xlsx => sheet::to_markdown(path)?,
            DocFormat::Docx => office::docx_to_markdown(path)?,
            DocFormat::Pptx => office::pptx_to_markdown(path)?,
        };

        if markdown.trim().is_empty() {
            return Err(EngineError::EmptyDocument);
        }
        Ok(markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_mapping() {
        assert_eq!(DocFormat::from_extension(".pdf"), Some(DocFormat::Pdf));
        assert_eq!(DocFormat::from_extension(".html"), Some(DocFormat::Html));
        assert_eq!(DocFormat::from_extension(".htm"), Some(DocFormat::Html));
        assert_eq!(DocFormat::from_extension(".docx"), Some(DocFormat::Docx));
        assert_eq!(DocFormat::from_extension(".exe"), None);
        // mapping is exact: uppercase is the caller's problem
        assert_eq!(DocFormat::from_extension(".PDF"), None);
    }

    #[test]
    fn html_file_converts_to_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<h1>Title</h1><p>Some <b>bold</b> text.</p>").unwrap();

        let converter = DocumentConverter::new();
        let md = converter.convert(&path, DocFormat::Html).unwrap();
        assert!(md.contains("Title"));
        assert!(md.contains("bold"));
    }

    #[test]
    fn empty_html_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.html");
        std::fs::write(&path, "<html><body></body></html>").unwrap();

        let converter = DocumentConverter::new();
        let err = converter.convert(&path, DocFormat::Html).unwrap_err();
        assert!(matches!(err, EngineError::EmptyDocument));
    }
}
