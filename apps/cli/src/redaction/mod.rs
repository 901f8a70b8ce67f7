//! Redaction stage — strips student-identifying information from Word
//! documents.
//!
//! Flow per document: convert to Markdown → model redaction call → persist as
//! `<out_dir>/<stem>.md`. This is the one batch stage in the pipeline and the
//! one place fault isolation is required: a failing document is logged and
//! counted, and its siblings still run.

pub mod prompts;

use std::path::Path;

use tracing::{error, info};

use crate::config::Config;
use crate::convert::convert;
use crate::errors::PipelineError;
use crate::llm_client::{ChatMessage, TextGenerator};
use crate::materials::{find_docx_files, InputSource};
use crate::storage::save_text;

use prompts::{REDACTION_PROMPT, REDACTION_SYSTEM, REDACTION_TEMPERATURE};

/// Aggregate outcome of one redaction batch. `failed > 0` maps to a nonzero
/// process exit in `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedactionReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// Runs the redaction batch over `in_path` (file or directory).
///
/// With `dry_run` the model call is skipped and the converted Markdown is
/// persisted as-is, which lets the conversion half of the pipeline be checked
/// without credentials.
pub fn run(
    config: &Config,
    llm: &dyn TextGenerator,
    in_path: &Path,
    out_dir: &Path,
    dry_run: bool,
) -> Result<RedactionReport, PipelineError> {
    let input = InputSource::resolve(in_path)?;
    let documents = find_docx_files(&input);
    if documents.is_empty() {
        return Err(PipelineError::EmptyBatch(input.path().to_path_buf()));
    }

    let mut report = RedactionReport {
        succeeded: 0,
        failed: 0,
    };

    for document in &documents {
        info!("Processing: {}", document.display());
        match process_document(config, llm, document, out_dir, dry_run) {
            Ok(()) => {
                info!("Successfully processed {}", document.display());
                report.succeeded += 1;
            }
            Err(e) => {
                error!("Failed to process {}: {e}", document.display());
                report.failed += 1;
            }
        }
    }

    info!(
        "Redaction complete: {} succeeded, {} failed",
        report.succeeded, report.failed
    );
    Ok(report)
}

fn process_document(
    config: &Config,
    llm: &dyn TextGenerator,
    document: &Path,
    out_dir: &Path,
    dry_run: bool,
) -> Result<(), PipelineError> {
    let markdown = convert(document)?;

    let redacted = if dry_run {
        info!("Dry run: skipping model call for {}", document.display());
        markdown
    } else {
        let messages = [
            ChatMessage::system(REDACTION_SYSTEM),
            ChatMessage::user(format!("{REDACTION_PROMPT}{markdown}")),
        ];
        llm.generate(&messages, &config.model, REDACTION_TEMPERATURE)?
    };

    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    save_text(&out_dir.join(format!("{stem}.md")), &redacted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::testing::write_docx;
    use crate::llm_client::testing::MockGenerator;
    use tempfile::TempDir;

    fn test_config() -> Config {
        Config {
            anthropic_api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_batch_isolates_per_document_failures() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("redacted");
        for name in ["one.docx", "three.docx", "two.docx"] {
            write_docx(&tmp.path().join(name), &["Body of the letter."]);
        }

        // Discovery order is sorted: one, three, two. The middle call fails.
        let llm = MockGenerator::new()
            .reply("[STUDENT_NAME] did well.")
            .fail("simulated transport failure")
            .reply("[STUDENT_NAME] did great.");

        let report = run(&test_config(), &llm, tmp.path(), &out, false).unwrap();
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert!(out.join("one.md").exists());
        assert!(!out.join("three.md").exists());
        assert!(out.join("two.md").exists());
    }

    #[test]
    fn test_single_file_input() {
        let tmp = TempDir::new().unwrap();
        let doc = tmp.path().join("letter.docx");
        write_docx(&doc, &["Jane was my student."]);
        let out = tmp.path().join("out");

        let llm = MockGenerator::new().reply("[STUDENT_NAME] was my student.");
        let report = run(&test_config(), &llm, &doc, &out, false).unwrap();

        assert_eq!(report.succeeded, 1);
        assert_eq!(
            std::fs::read_to_string(out.join("letter.md")).unwrap(),
            "[STUDENT_NAME] was my student."
        );
    }

    #[test]
    fn test_empty_batch_is_a_precondition_error() {
        let tmp = TempDir::new().unwrap();
        let llm = MockGenerator::new();
        let err = run(
            &test_config(),
            &llm,
            tmp.path(),
            &tmp.path().join("out"),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::EmptyBatch(_)));
        assert_eq!(llm.calls.get(), 0);
    }

    #[test]
    fn test_missing_input_path_is_not_found() {
        let llm = MockGenerator::new();
        let err = run(
            &test_config(),
            &llm,
            Path::new("/no/such/letters"),
            Path::new("/tmp/out"),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Material(_)));
    }

    #[test]
    fn test_dry_run_skips_the_gateway() {
        let tmp = TempDir::new().unwrap();
        let doc = tmp.path().join("letter.docx");
        write_docx(&doc, &["Jane was my student."]);
        let out = tmp.path().join("out");

        let llm = MockGenerator::new();
        let report = run(&test_config(), &llm, &doc, &out, true).unwrap();

        assert_eq!(report.succeeded, 1);
        assert_eq!(llm.calls.get(), 0);
        // Dry run persists the converted text untouched.
        assert_eq!(
            std::fs::read_to_string(out.join("letter.md")).unwrap(),
            "Jane was my student."
        );
    }

    #[test]
    fn test_redaction_prompt_precedes_document_text() {
        let tmp = TempDir::new().unwrap();
        let doc = tmp.path().join("letter.docx");
        write_docx(&doc, &["The document body."]);

        let llm = MockGenerator::new().reply("redacted");
        run(&test_config(), &llm, &doc, &tmp.path().join("out"), false).unwrap();

        let prompt = llm.last_prompt.borrow().clone().unwrap();
        assert!(prompt.starts_with("You are a document redaction assistant."));
        assert!(prompt.ends_with("Document to redact:\n\nThe document body."));
    }
}
