//! Output Renderer — converts a generated Markdown letter into a Word
//! document.
//!
//! Deliberately lossy: only two constructs are recognized. A line fully
//! wrapped in double underscores is the letterhead convention and renders as
//! a bold left-aligned paragraph; any other non-blank, non-heading line
//! renders as a plain paragraph. Markdown headings and blank lines are
//! dropped. Default font is Times New Roman 12pt. No round-trip guarantee.
//!
//! The `.docx` package is written directly: a minimal OOXML ZIP with content
//! types, package relationships, `word/document.xml`, and `word/styles.xml`.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use quick_xml::escape::escape;
use tracing::info;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::errors::PipelineError;
use crate::storage::read_text;

const FONT_NAME: &str = "Times New Roman";
/// 12pt in OOXML half-points.
const FONT_SIZE_HALF_POINTS: u32 = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    /// A `__wrapped__` letterhead line; rendered bold, left-aligned.
    Letterhead(String),
    Paragraph(String),
}

/// Renders `markdown_path` to a sibling `.docx`, returning the new path.
pub fn render(markdown_path: &Path) -> Result<PathBuf, PipelineError> {
    let markdown = read_text(markdown_path)?;
    let blocks = parse_blocks(&markdown);

    let document_path = markdown_path.with_extension("docx");
    write_package(&document_path, &blocks)?;
    info!(
        "Rendered {} block(s) to {}",
        blocks.len(),
        document_path.display()
    );
    Ok(document_path)
}

fn parse_blocks(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for line in markdown.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some(inner) = letterhead_text(trimmed) {
            blocks.push(Block::Letterhead(inner.to_string()));
        } else {
            blocks.push(Block::Paragraph(trimmed.to_string()));
        }
    }
    blocks
}

/// A letterhead line is fully wrapped in `__` markers with content between.
fn letterhead_text(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("__")?.strip_suffix("__")?;
    if inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}

fn write_package(path: &Path, blocks: &[Block]) -> Result<(), PipelineError> {
    let file = File::create(path).map_err(|e| PipelineError::io("create", path, e))?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default();

    let io_err = |e: std::io::Error| PipelineError::io("write", path, e);
    let zip_err = |e: zip::result::ZipError| {
        PipelineError::io(
            "write",
            path,
            std::io::Error::new(std::io::ErrorKind::Other, e),
        )
    };

    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.to_string()),
        ("word/styles.xml", styles_xml()),
        ("word/document.xml", document_xml(blocks)),
    ] {
        zip.start_file(name, options).map_err(zip_err)?;
        zip.write_all(content.as_bytes()).map_err(io_err)?;
    }
    zip.finish().map_err(zip_err)?;
    Ok(())
}

fn document_xml(blocks: &[Block]) -> String {
    let mut body = String::new();
    for block in blocks {
        match block {
            Block::Letterhead(text) => {
                body.push_str(&format!(
                    "<w:p><w:pPr><w:jc w:val=\"left\"/></w:pPr>\
                     <w:r><w:rPr><w:b/></w:rPr>\
                     <w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
                    escape(text.as_str())
                ));
            }
            Block::Paragraph(text) => {
                body.push_str(&format!(
                    "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
                    escape(text.as_str())
                ));
            }
        }
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    )
}

fn styles_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:styles xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:docDefaults><w:rPrDefault><w:rPr>\
         <w:rFonts w:ascii=\"{FONT_NAME}\" w:hAnsi=\"{FONT_NAME}\"/>\
         <w:sz w:val=\"{FONT_SIZE_HALF_POINTS}\"/>\
         </w:rPr></w:rPrDefault></w:docDefaults></w:styles>"
    )
}

const CONTENT_TYPES_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
<Override PartName=\"/word/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>\
</Types>";

const PACKAGE_RELS_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\
</Relationships>";

const DOCUMENT_RELS_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>\
</Relationships>";
