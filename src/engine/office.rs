//! DOCX / PPTX backends.
//!
//! Both formats are OOXML zip containers. We pull the relevant XML part(s)
//! with `zip` and walk them with `quick-xml`, collecting the text runs
//! (`<w:t>` in WordprocessingML, `<a:t>` in DrawingML). Both vocabularies
//! use the local names `t` for runs, `p` for paragraphs and `br` for
//! breaks, so one extractor serves both.

use super::{EngineError, EngineResult};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// Extract paragraphs from `word/document.xml`.
pub fn docx_to_markdown(path: &Path) -> EngineResult<String> {
    let mut archive = open_container(path)?;
    let xml = read_part(&mut archive, "word/document.xml")?;
    extract_text_runs(&xml)
}

/// Extract text from each `ppt/slides/slideN.xml`, in slide order.
pub fn pptx_to_markdown(path: &Path) -> EngineResult<String> {
    let mut archive = open_container(path)?;

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .map(|name| (slide_number(name), name.to_string()))
        .collect();
    slides.sort_by_key(|(n, _)| *n);

    if slides.is_empty() {
        return Err(EngineError::MissingPart("ppt/slides/slide1.xml".into()));
    }

    let mut parts = Vec::with_capacity(slides.len());
    for (_, name) in slides {
        let xml = read_part(&mut archive, &name)?;
        let text = extract_text_runs(&xml)?;
        if !text.trim().is_empty() {
            parts.push(text.trim().to_string());
        }
    }
    Ok(parts.join("\n\n"))
}

fn open_container(path: &Path) -> EngineResult<ZipArchive<File>> {
    let file = File::open(path)?;
    ZipArchive::new(file).map_err(|e| EngineError::Container(e.to_string()))
}

fn read_part(archive: &mut ZipArchive<File>, name: &str) -> EngineResult<String> {
    let mut part = archive.by_name(name).map_err(|e| match e {
        ZipError::FileNotFound => EngineError::MissingPart(name.to_string()),
        other => EngineError::Container(other.to_string()),
    })?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

/// `ppt/slides/slide12.xml` -> 12. Unparseable names sort first.
fn slide_number(name: &str) -> u32 {
    name.strip_prefix("ppt/slides/slide")
        .and_then(|rest| rest.strip_suffix(".xml"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

/// Walk the XML and collect text runs, separating paragraphs with blank
/// lines. Line breaks (`<w:br/>`, `<a:br/>`) become single newlines and
/// tabs become spaces.
fn extract_text_runs(xml: &str) -> EngineResult<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_run = false;

    loop {
        match reader
            .read_event()
            .map_err(|e| EngineError::Container(e.to_string()))?
        {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_run = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run = false,
                b"p" => {
                    if !out.is_empty() && !out.ends_with("\n\n") {
                        while out.ends_with('\n') {
                            out.pop();
                        }
                        out.push_str("\n\n");
                    }
                }
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"br" => out.push('\n'),
                b"tab" => out.push(' '),
                _ => {}
            },
            Event::Text(t) if in_run => {
                let text = t
                    .unescape()
                    .map_err(|e| EngineError::Container(e.to_string()))?;
                out.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn zip_with(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    const DOCX_XML: &str = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>
    <w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph &amp; more.</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn docx_paragraphs_become_blank_line_separated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.docx");
        std::fs::write(&path, zip_with(&[("word/document.xml", DOCX_XML)])).unwrap();

        let md = docx_to_markdown(&path).unwrap();
        assert_eq!(md, "First paragraph.\n\nSecond paragraph & more.");
    }

    #[test]
    fn docx_without_document_part_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, zip_with(&[("other.xml", "<x/>")])).unwrap();

        let err = docx_to_markdown(&path).unwrap_err();
        assert!(matches!(err, EngineError::MissingPart(_)), "got {err:?}");
    }

    #[test]
    fn pptx_slides_are_ordered_numerically() {
        let slide = |text: &str| {
            format!(
                r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
                <a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:sld>"#
            )
        };
        let s1 = slide("slide one");
        let s2 = slide("slide two");
        let s10 = slide("slide ten");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        // insertion order deliberately scrambled; slide10 must sort after slide2
        std::fs::write(
            &path,
            zip_with(&[
                ("ppt/slides/slide10.xml", &s10),
                ("ppt/slides/slide1.xml", &s1),
                ("ppt/slides/slide2.xml", &s2),
            ]),
        )
        .unwrap();

        let md = pptx_to_markdown(&path).unwrap();
        assert_eq!(md, "slide one\n\nslide two\n\nslide ten");
    }

    #[test]
    fn slide_number_parses() {
        assert_eq!(slide_number("ppt/slides/slide7.xml"), 7);
        assert_eq!(slide_number("ppt/slides/slide12.xml"), 12);
        assert_eq!(slide_number("ppt/slides/slideX.xml"), 0);
    }
}
