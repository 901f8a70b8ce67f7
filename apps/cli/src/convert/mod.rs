//! Material Converter — normalizes supported source files into text.
//!
//! Dispatch is purely by file extension. Word documents become Markdown with
//! images dropped; PDFs are extracted page by page (no OCR — an image-only
//! page is skipped with a warning); plain text and Markdown pass through
//! unchanged.

mod docx;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::materials::extension_lowercase;

pub use docx::docx_to_markdown;

#[cfg(test)]
pub use docx::testing;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Unsupported format '.{extension}' for '{path}'")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF extraction failed for '{path}': {message}")]
    Pdf { path: PathBuf, message: String },

    #[error("DOCX conversion failed for '{path}': {message}")]
    Docx { path: PathBuf, message: String },
}

/// Converts one source document to normalized text.
pub fn convert(path: &Path) -> Result<String, ConvertError> {
    let extension = extension_lowercase(path).unwrap_or_default();
    match extension.as_str() {
        "docx" => docx_to_markdown(path),
        "pdf" => pdf_to_text(path),
        "txt" | "md" => std::fs::read_to_string(path).map_err(|source| ConvertError::Read {
            path: path.to_path_buf(),
            source,
        }),
        _ => Err(ConvertError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}

/// Extracts PDF text page by page, joining non-empty pages with blank lines.
fn pdf_to_text(path: &Path) -> Result<String, ConvertError> {
    info!("Extracting text from {}...", path.display());
    let pages = pdf_extract::extract_text_by_pages(path).map_err(|e| ConvertError::Pdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut kept = Vec::with_capacity(pages.len());
    for (index, page) in pages.iter().enumerate() {
        let trimmed = page.trim();
        if trimmed.is_empty() {
            // Scanned/image-only pages yield no text layer.
            warn!(
                "Page {} of {} produced no extractable text, skipping",
                index + 1,
                path.display()
            );
        } else {
            kept.push(trimmed.to_string());
        }
    }

    Ok(kept.join("\n\n"))
}
