//! Packet-synthesis stage — turns a student's application materials into a
//! structured packet.
//!
//! Directory contract:
//!
//! ```text
//! student_dir/
//! ├── input/              # resume/transcript/accomplishments/statement files
//! ├── markdown/           # staged conversions, written by this stage
//! └── student_packet.md   # written by this stage
//! ```
//!
//! Every converted material is persisted under `markdown/` before the model
//! call so conversions can be inspected (and reused) independently of
//! generation.

pub mod prompts;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::compose::{compose_materials, MissingRoles, RoleTexts};
use crate::config::Config;
use crate::convert::convert;
use crate::errors::PipelineError;
use crate::llm_client::{ChatMessage, TextGenerator};
use crate::materials::{locate, Role};
use crate::storage::{save_text, word_count};

use prompts::{SYNTHESIS_SYSTEM, SYNTHESIS_TEMPERATURE, SYNTHESIS_TEMPLATE};

pub const PACKET_FILENAME: &str = "student_packet.md";

/// The one section never filled by the pipeline. Its literal presence in a
/// packet signals "not yet completed by a human" — a workflow contract, so
/// the exact bytes matter.
pub const PERSPECTIVE_SENTINEL: &str = "[TO BE COMPLETED MANUALLY BY PROFESSOR]";

/// Synthesizes `student_dir/student_packet.md` from `student_dir/input/`.
pub fn run(
    config: &Config,
    llm: &dyn TextGenerator,
    student_dir: &Path,
    missing: MissingRoles,
) -> Result<PathBuf, PipelineError> {
    info!(
        "Synthesizing student packet for: {}",
        student_dir.display()
    );

    let input_dir = student_dir.join("input");
    let bundle = locate(&input_dir);
    if bundle.is_empty() {
        return Err(PipelineError::NoMaterials(input_dir));
    }
    info!("Found material(s): {}", bundle.present_roles().join(", "));

    let markdown_dir = student_dir.join("markdown");
    let mut materials = RoleTexts::default();
    for role in Role::ALL {
        let Some(path) = bundle.get(role) else {
            continue;
        };
        info!("Processing {}: {}", role.as_str(), path.display());
        let text = convert(path)?;
        save_text(&markdown_dir.join(format!("{}.md", role.as_str())), &text)?;
        materials.set(role, text);
    }

    let prompt = compose_materials(SYNTHESIS_TEMPLATE, &materials, missing);
    info!(
        "Sending materials to the model for synthesis ({} prompt words)...",
        word_count(&prompt)
    );

    let messages = [
        ChatMessage::system(SYNTHESIS_SYSTEM),
        ChatMessage::user(prompt),
    ];
    let packet = llm.generate(&messages, &config.model, SYNTHESIS_TEMPERATURE)?;
    info!("Received student packet ({} words)", word_count(&packet));

    let output_path = student_dir.join(PACKET_FILENAME);
    save_text(&output_path, &packet)?;
    info!(
        "Packet synthesis complete; add the professor's-perspective section before generating a letter"
    );
    Ok(output_path)
}
