//! Filesystem helpers shared by the stage pipelines.
//!
//! Artifacts are persisted verbatim; a rerun overwrites the prior artifact at
//! the same path with no versioning.

use std::path::Path;

use tracing::info;

use crate::errors::PipelineError;

pub fn save_text(path: &Path, content: &str) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PipelineError::io("create", parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| PipelineError::io("write", path, e))?;
    info!("Saved {}", path.display());
    Ok(())
}

pub fn read_text(path: &Path) -> Result<String, PipelineError> {
    std::fs::read_to_string(path).map_err(|e| PipelineError::io("read", path, e))
}

/// Word count used in progress logs only.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_text_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a/b/out.md");
        save_text(&path, "content").unwrap();
        assert_eq!(read_text(&path).unwrap(), "content");
    }

    #[test]
    fn test_save_text_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.md");
        save_text(&path, "first").unwrap();
        save_text(&path, "second").unwrap();
        assert_eq!(read_text(&path).unwrap(), "second");
    }

    #[test]
    fn test_read_text_missing_file_names_path() {
        let err = read_text(Path::new("/no/such/file.md")).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.md"));
    }
}
