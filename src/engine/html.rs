//! HTML backend: delegate to `html2md`.

use super::EngineResult;
use std::fs;
use std::path::Path;

/// Read an HTML file and convert it to Markdown.
///
/// Byte sequences that are not valid UTF-8 are replaced rather than
/// rejected; real-world HTML is frequently mislabelled.
pub fn to_markdown(path: &Path) -> EngineResult<String> {
    let bytes = fs::read(path)?;
    let html = String::from_utf8_lossy(&bytes);
    Ok(html2md::parse_html(&html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_and_lists_survive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.html");
        fs::write(
            &path,
            "<h2>Section</h2><ul><li>alpha</li><li>beta</li></ul>",
        )
        .unwrap();

        let md = to_markdown(&path).unwrap();
        // heading style (ATX vs setext) is the library's choice; just
        // check the text and the list markers made it through
        assert!(md.contains("Section"), "got: {md}");
        assert!(md.contains("* alpha") || md.contains("- alpha"), "got: {md}");
        assert!(md.contains("beta"));
    }
}
