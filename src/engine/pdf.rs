//! PDF backend: plain-text extraction via `pdf-extract`.

use super::{EngineError, EngineResult};
use std::path::Path;

/// Extract the text layer of a PDF.
///
/// `pdf-extract` emits text in reading order with blank lines between
/// blocks, which is already serviceable Markdown for prose documents.
/// Scanned PDFs with no text layer come back empty and are rejected by
/// the caller's empty-output check.
pub fn to_markdown(path: &Path) -> EngineResult<String> {
    let text = pdf_extract::extract_text(path).map_err(|e| EngineError::Pdf(e.to_string()))?;
    Ok(normalize(&text))
}

/// Collapse runs of 3+ newlines down to paragraph breaks.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0usize;
    for line in text.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run == 1 {
                out.push('\n');
            }
        } else {
            blank_run = 0;
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_blank_runs() {
        let input = "first\n\n\n\n\nsecond\nthird\n";
        let out = normalize(input);
        assert_eq!(out, "first\n\nsecond\nthird\n");
    }

    #[test]
    fn normalize_trims_trailing_whitespace() {
        let out = normalize("line   \nnext\t\n");
        assert_eq!(out, "line\nnext\n");
    }
}
