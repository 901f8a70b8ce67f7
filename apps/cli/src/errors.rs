use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::convert::ConvertError;
use crate::llm_client::LlmError;
use crate::materials::MaterialError;

/// Top-level error for one stage invocation.
///
/// Precondition failures name the offending path so the operator can fix the
/// directory layout. Gateway transport errors pass through unmodified —
/// generation failure is always fatal for the enclosing unit of work.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("Model gateway error: {0}")]
    Llm(#[from] LlmError),

    #[error("No documents to redact under '{0}'")]
    EmptyBatch(PathBuf),

    #[error("No .md files found in '{0}'")]
    EmptyCorpus(PathBuf),

    #[error("No student materials found in '{0}'")]
    NoMaterials(PathBuf),

    #[error("Student packet not found at '{0}' — run 'lor synthesize-packet' first")]
    PacketMissing(PathBuf),

    #[error("Style guide not found at '{0}'")]
    StyleGuideMissing(PathBuf),

    #[error("Failed to {action} '{path}': {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        PipelineError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}
