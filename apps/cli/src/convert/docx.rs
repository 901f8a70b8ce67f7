//! Word-document to Markdown conversion.
//!
//! A `.docx` is a ZIP package; the body lives in `word/document.xml` as
//! WordprocessingML. The converter streams that XML and keeps only structure
//! that survives in Markdown: heading styles, bold/italic runs, list items,
//! line breaks. Embedded images and drawings are dropped entirely so output
//! stays text-only and deterministic.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::info;
use zip::ZipArchive;

use super::ConvertError;

pub fn docx_to_markdown(path: &Path) -> Result<String, ConvertError> {
    info!("Converting {} to Markdown...", path.display());
    let xml = read_document_xml(path)?;
    parse_document_xml(&xml).map_err(|message| ConvertError::Docx {
        path: path.to_path_buf(),
        message,
    })
}

fn read_document_xml(path: &Path) -> Result<String, ConvertError> {
    let file = File::open(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let docx = |message: String| ConvertError::Docx {
        path: path.to_path_buf(),
        message,
    };

    let mut archive = ZipArchive::new(file).map_err(|e| docx(format!("not a ZIP package: {e}")))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| docx(format!("missing word/document.xml: {e}")))?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| docx(format!("unreadable word/document.xml: {e}")))?;
    Ok(xml)
}

#[derive(Default)]
struct ParagraphState {
    text: String,
    heading_level: Option<usize>,
    is_list: bool,
}

#[derive(Default)]
struct RunState {
    text: String,
    bold: bool,
    italic: bool,
}

fn parse_document_xml(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs: Vec<String> = Vec::new();
    let mut paragraph = ParagraphState::default();
    let mut run = RunState::default();
    let mut in_paragraph_props = false;
    let mut in_run_props = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => paragraph = ParagraphState::default(),
                b"w:pPr" => in_paragraph_props = true,
                b"w:r" => run = RunState::default(),
                b"w:rPr" if !in_paragraph_props => in_run_props = true,
                b"w:t" => in_text = true,
                b"w:numPr" if in_paragraph_props => paragraph.is_list = true,
                // Images and fallback drawing content are dropped wholesale.
                b"w:drawing" | b"w:pict" | b"w:object" | b"mc:AlternateContent" => {
                    reader
                        .read_to_end(e.name())
                        .map_err(|e| format!("XML parse error: {e}"))?;
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:pStyle" if in_paragraph_props => {
                    paragraph.heading_level = heading_level(&e)?;
                }
                b"w:numPr" if in_paragraph_props => paragraph.is_list = true,
                b"w:b" if in_run_props => run.bold = !toggle_is_off(&e)?,
                b"w:i" if in_run_props => run.italic = !toggle_is_off(&e)?,
                b"w:br" => run.text.push('\n'),
                b"w:tab" => run.text.push('\t'),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if in_text {
                    run.text
                        .push_str(&t.unescape().map_err(|e| format!("XML text error: {e}"))?);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:pPr" => in_paragraph_props = false,
                b"w:rPr" => in_run_props = false,
                b"w:t" => in_text = false,
                b"w:r" => {
                    let rendered = render_run(&run);
                    paragraph.text.push_str(&rendered);
                    run = RunState::default();
                }
                b"w:p" => {
                    if let Some(line) = render_paragraph(&paragraph) {
                        paragraphs.push(line);
                    }
                    paragraph = ParagraphState::default();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("XML parse error: {e}")),
            _ => {}
        }
    }

    Ok(paragraphs.join("\n\n"))
}

/// Maps `w:pStyle w:val="HeadingN"` to a Markdown heading depth (clamped 1-6).
fn heading_level(e: &BytesStart) -> Result<Option<usize>, String> {
    let Some(val) = attribute(e, "w:val")? else {
        return Ok(None);
    };
    let Some(digits) = val.strip_prefix("Heading") else {
        return Ok(None);
    };
    Ok(digits.parse::<usize>().ok().map(|n| n.clamp(1, 6)))
}

/// A bare `<w:b/>` means on; `w:val="false"` / `w:val="0"` switch it off.
fn toggle_is_off(e: &BytesStart) -> Result<bool, String> {
    Ok(matches!(
        attribute(e, "w:val")?.as_deref(),
        Some("false") | Some("0")
    ))
}

fn attribute(e: &BytesStart, name: &str) -> Result<Option<String>, String> {
    let attr = e
        .try_get_attribute(name)
        .map_err(|e| format!("XML attribute error: {e}"))?;
    match attr {
        Some(a) => {
            let value = a
                .unescape_value()
                .map_err(|e| format!("XML attribute error: {e}"))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

fn render_run(run: &RunState) -> String {
    if (!run.bold && !run.italic) || run.text.trim().is_empty() {
        return run.text.clone();
    }
    // Emphasis markers go around the core text, not surrounding whitespace.
    let lead_len = run.text.len() - run.text.trim_start().len();
    let (lead, rest) = run.text.split_at(lead_len);
    let core_len = rest.trim_end().len();
    let (core, trail) = rest.split_at(core_len);
    let marker = match (run.bold, run.italic) {
        (true, true) => "***",
        (true, false) => "**",
        _ => "*",
    };
    format!("{lead}{marker}{core}{marker}{trail}")
}

fn render_paragraph(paragraph: &ParagraphState) -> Option<String> {
    let text = paragraph.text.trim_end();
    if text.trim().is_empty() {
        return None;
    }
    Some(match paragraph.heading_level {
        Some(level) => format!("{} {}", "#".repeat(level), text),
        None if paragraph.is_list => format!("- {text}"),
        None => text.to_string(),
    })
}
