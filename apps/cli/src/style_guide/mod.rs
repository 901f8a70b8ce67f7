//! Style-extraction stage — derives a writing style guide from a corpus of
//! redacted letters.
//!
//! Unlike redaction this is a single aggregate model call over the whole
//! corpus, so missing/empty input is a precondition failure surfaced before
//! any generation is attempted, not a per-file failure.

pub mod prompts;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::compose::compose_letter_corpus;
use crate::config::Config;
use crate::errors::PipelineError;
use crate::llm_client::{ChatMessage, TextGenerator};
use crate::materials::find_markdown_files;
use crate::storage::{read_text, save_text, word_count};

use prompts::{STYLE_SYSTEM, STYLE_TEMPERATURE, STYLE_TEMPLATE};

pub const STYLE_GUIDE_FILENAME: &str = "style_guide.md";

/// Extracts a style guide from `redacted_dir/*.md` into
/// `out_dir/style_guide.md`.
pub fn run(
    config: &Config,
    llm: &dyn TextGenerator,
    redacted_dir: &Path,
    out_dir: &Path,
) -> Result<PathBuf, PipelineError> {
    info!("Extracting style guide from: {}", redacted_dir.display());

    let md_files = find_markdown_files(redacted_dir)?;
    if md_files.is_empty() {
        return Err(PipelineError::EmptyCorpus(redacted_dir.to_path_buf()));
    }

    let mut letters = Vec::with_capacity(md_files.len());
    for path in &md_files {
        info!("Loading: {}", path.display());
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        letters.push((stem, read_text(path)?));
    }
    info!("Loaded {} redacted letter(s)", letters.len());

    let prompt = compose_letter_corpus(STYLE_TEMPLATE, &letters);
    info!(
        "Sending letters to the model for style extraction ({} prompt words)...",
        word_count(&prompt)
    );

    let messages = [
        ChatMessage::system(STYLE_SYSTEM),
        ChatMessage::user(prompt),
    ];
    let style_guide = llm.generate(&messages, &config.model, STYLE_TEMPERATURE)?;
    info!(
        "Received style guide ({} words)",
        word_count(&style_guide)
    );

    let output_path = out_dir.join(STYLE_GUIDE_FILENAME);
    save_text(&output_path, &style_guide)?;
    info!("Style extraction complete; review and edit the guide for accuracy");
    Ok(output_path)
}
