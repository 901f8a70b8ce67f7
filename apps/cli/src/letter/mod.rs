//! Letter-generation stage — combines the style guide and student packet into
//! a draft letter.
//!
//! Requires a completed `student_packet.md` in the student directory and an
//! externally supplied style-guide path. An unfilled professor's-perspective
//! sentinel in the packet is a warning, never a failure: the draft is still
//! produced, just from an incomplete packet.

pub mod prompts;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::compose::compose_letter_prompt;
use crate::config::Config;
use crate::errors::PipelineError;
use crate::llm_client::{ChatMessage, TextGenerator};
use crate::packet::{PACKET_FILENAME, PERSPECTIVE_SENTINEL};
use crate::render;
use crate::storage::{read_text, save_text, word_count};

use prompts::{LETTER_SYSTEM, LETTER_TEMPERATURE, LETTER_TEMPLATE};

pub const DEFAULT_OUTPUT_FILENAME: &str = "letter_draft.md";

/// Generates `student_dir/output/<output_filename>`; with `render_docx` a
/// Word rendering is written alongside it.
pub fn run(
    config: &Config,
    llm: &dyn TextGenerator,
    student_dir: &Path,
    style_guide_path: &Path,
    output_filename: &str,
    render_docx: bool,
) -> Result<PathBuf, PipelineError> {
    info!("Generating letter for: {}", student_dir.display());

    if !style_guide_path.is_file() {
        return Err(PipelineError::StyleGuideMissing(
            style_guide_path.to_path_buf(),
        ));
    }
    let style_guide = read_text(style_guide_path)?;
    info!("Style guide loaded ({} words)", word_count(&style_guide));

    let packet_path = student_dir.join(PACKET_FILENAME);
    if !packet_path.is_file() {
        return Err(PipelineError::PacketMissing(packet_path));
    }
    let student_packet = read_text(&packet_path)?;
    info!(
        "Student packet loaded ({} words)",
        word_count(&student_packet)
    );

    if student_packet.contains(PERSPECTIVE_SENTINEL) {
        warn!(
            "Student packet still contains '{PERSPECTIVE_SENTINEL}'. The generated letter may be \
             incomplete without the professor's personal observations; consider completing that \
             section before generating."
        );
    }

    let current_date = chrono::Local::now().format("%B %d, %Y").to_string();
    let prompt = compose_letter_prompt(LETTER_TEMPLATE, &style_guide, &student_packet, &current_date);
    info!(
        "Sending to the model for letter generation ({} prompt words)...",
        word_count(&prompt)
    );

    let messages = [
        ChatMessage::system(LETTER_SYSTEM),
        ChatMessage::user(prompt),
    ];
    let letter = llm.generate(&messages, &config.model, LETTER_TEMPERATURE)?;
    info!("Received letter ({} words)", word_count(&letter));

    let output_path = student_dir.join("output").join(output_filename);
    save_text(&output_path, &letter)?;

    if render_docx {
        let document_path = render::render(&output_path)?;
        info!("Rendered Word document: {}", document_path.display());
    }

    info!("Letter generation complete; review the draft for accuracy and voice");
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::MockGenerator;
    use std::fs;
    use tempfile::TempDir;

    fn test_config() -> Config {
        Config {
            anthropic_api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            rust_log: "info".to_string(),
        }
    }

    fn fixture(packet: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("student_packet.md"), packet).unwrap();
        let guide = tmp.path().join("style_guide.md");
        fs::write(&guide, "# Style Guide\n\nWarm and direct.").unwrap();
        (tmp, guide)
    }

    #[test]
    fn test_generates_draft_under_output_dir() {
        let (tmp, guide) = fixture("# Packet\n\nFacts.");

        let llm = MockGenerator::new().reply("Dear Committee,\n\nThe letter.");
        let path = run(
            &test_config(),
            &llm,
            tmp.path(),
            &guide,
            DEFAULT_OUTPUT_FILENAME,
            false,
        )
        .unwrap();

        assert_eq!(path, tmp.path().join("output/letter_draft.md"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Dear Committee,\n\nThe letter."
        );
    }

    #[test]
    fn test_sentinel_warns_but_still_generates() {
        let (tmp, guide) = fixture(&format!(
            "# Packet\n\n## Strengths from Professor's Perspective\n\n{PERSPECTIVE_SENTINEL}"
        ));

        let llm = MockGenerator::new().reply("draft");
        let path = run(
            &test_config(),
            &llm,
            tmp.path(),
            &guide,
            DEFAULT_OUTPUT_FILENAME,
            false,
        )
        .unwrap();

        assert!(path.exists());
        assert_eq!(llm.calls.get(), 1);
    }

    #[test]
    fn test_missing_packet_is_a_precondition_error() {
        let tmp = TempDir::new().unwrap();
        let guide = tmp.path().join("style_guide.md");
        fs::write(&guide, "guide").unwrap();

        let llm = MockGenerator::new();
        let err = run(
            &test_config(),
            &llm,
            tmp.path(),
            &guide,
            DEFAULT_OUTPUT_FILENAME,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::PacketMissing(_)));
        assert_eq!(llm.calls.get(), 0);
    }

    #[test]
    fn test_missing_style_guide_is_a_precondition_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("student_packet.md"), "packet").unwrap();

        let llm = MockGenerator::new();
        let err = run(
            &test_config(),
            &llm,
            tmp.path(),
            Path::new("/no/such/guide.md"),
            DEFAULT_OUTPUT_FILENAME,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::StyleGuideMissing(_)));
        assert_eq!(llm.calls.get(), 0);
    }

    #[test]
    fn test_prompt_contains_guide_and_packet() {
        let (tmp, guide) = fixture("PACKET CONTENT");

        let llm = MockGenerator::new().reply("draft");
        run(
            &test_config(),
            &llm,
            tmp.path(),
            &guide,
            DEFAULT_OUTPUT_FILENAME,
            false,
        )
        .unwrap();

        let prompt = llm.last_prompt.borrow().clone().unwrap();
        assert!(prompt.contains("# STYLE GUIDE\n\n# Style Guide\n\nWarm and direct."));
        assert!(prompt.contains("# STUDENT PACKET\n\nPACKET CONTENT"));
    }

    #[test]
    fn test_custom_output_filename_and_docx_rendering() {
        let (tmp, guide) = fixture("packet");

        let llm = MockGenerator::new().reply("__Prof. Example__\n\nBody paragraph.");
        let path = run(&test_config(), &llm, tmp.path(), &guide, "final.md", true).unwrap();

        assert_eq!(path, tmp.path().join("output/final.md"));
        assert!(tmp.path().join("output/final.docx").exists());
    }
}
