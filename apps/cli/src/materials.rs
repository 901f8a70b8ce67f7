//! Material Locator — classifies raw input files into semantic roles and
//! discovers redaction batches.
//!
//! `locate` inspects only a directory's immediate children; redaction-batch
//! discovery is the one recursive walk in the pipeline.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Extensions the Material Converter accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["docx", "pdf", "txt", "md"];

/// Prefix Office uses for lock/temp files sitting next to open documents.
const OFFICE_LOCK_PREFIX: &str = "~$";

#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("Path '{0}' does not exist")]
    NotFound(PathBuf),

    #[error("Path '{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The four fixed material roles, in canonical rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Resume,
    Transcript,
    Accomplishments,
    Statement,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Resume,
        Role::Transcript,
        Role::Accomplishments,
        Role::Statement,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Resume => "resume",
            Role::Transcript => "transcript",
            Role::Accomplishments => "accomplishments",
            Role::Statement => "statement",
        }
    }

    /// Human-facing section label used in composed prompts.
    pub fn label(self) -> &'static str {
        match self {
            Role::Resume => "Resume/CV",
            Role::Transcript => "Academic Transcript",
            Role::Accomplishments => "Accomplishments List",
            Role::Statement => "Personal Statement",
        }
    }

    /// Filename stems tried in order; first match wins.
    fn stem_patterns(self) -> &'static [&'static str] {
        match self {
            Role::Resume => &["resume", "cv"],
            Role::Transcript => &["transcript"],
            Role::Accomplishments => &["accomplishments", "achievements"],
            Role::Statement => &["statement", "personal_statement"],
        }
    }
}

/// Per-student set of located input files, at most one per role.
///
/// An absent role means no matching file was found; rendering decides whether
/// that absence is shown to the model (see `compose::MissingRoles`).
#[derive(Debug, Clone, Default)]
pub struct MaterialBundle {
    pub resume: Option<PathBuf>,
    pub transcript: Option<PathBuf>,
    pub accomplishments: Option<PathBuf>,
    pub statement: Option<PathBuf>,
}

impl MaterialBundle {
    pub fn get(&self, role: Role) -> Option<&PathBuf> {
        match role {
            Role::Resume => self.resume.as_ref(),
            Role::Transcript => self.transcript.as_ref(),
            Role::Accomplishments => self.accomplishments.as_ref(),
            Role::Statement => self.statement.as_ref(),
        }
    }

    fn set(&mut self, role: Role, path: PathBuf) {
        match role {
            Role::Resume => self.resume = Some(path),
            Role::Transcript => self.transcript = Some(path),
            Role::Accomplishments => self.accomplishments = Some(path),
            Role::Statement => self.statement = Some(path),
        }
    }

    pub fn is_empty(&self) -> bool {
        Role::ALL.iter().all(|&role| self.get(role).is_none())
    }

    pub fn present_roles(&self) -> Vec<&'static str> {
        Role::ALL
            .iter()
            .filter(|&&role| self.get(role).is_some())
            .map(|&role| role.as_str())
            .collect()
    }
}

/// Classifies the immediate children of `dir` into material roles.
///
/// A nonexistent directory yields an empty bundle rather than an error so
/// callers can treat "no directory" and "no materials" uniformly.
pub fn locate(dir: &Path) -> MaterialBundle {
    let mut bundle = MaterialBundle::default();

    let mut entries: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(read) => read
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect(),
        Err(_) => return bundle,
    };
    entries.sort();

    for role in Role::ALL {
        'patterns: for pattern in role.stem_patterns() {
            for path in &entries {
                if stem_matches(path, pattern) && has_supported_extension(path) {
                    bundle.set(role, path.clone());
                    break 'patterns;
                }
            }
        }
    }

    bundle
}

fn stem_matches(path: &Path, pattern: &str) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case(pattern))
        .unwrap_or(false)
}

fn has_supported_extension(path: &Path) -> bool {
    extension_lowercase(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

pub fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// A redaction input, resolved once at the entry boundary so downstream code
/// never re-inspects the path type.
#[derive(Debug, Clone)]
pub enum InputSource {
    SingleFile(PathBuf),
    Directory(PathBuf),
}

impl InputSource {
    pub fn resolve(path: &Path) -> Result<Self, MaterialError> {
        if path.is_file() {
            Ok(InputSource::SingleFile(path.to_path_buf()))
        } else if path.is_dir() {
            Ok(InputSource::Directory(path.to_path_buf()))
        } else {
            Err(MaterialError::NotFound(path.to_path_buf()))
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            InputSource::SingleFile(p) | InputSource::Directory(p) => p,
        }
    }
}

/// Collects the `.docx` documents named by a redaction input.
///
/// Directories are walked recursively; Office lock files (`~$` prefix) are
/// excluded everywhere. The result is sorted so batch order is deterministic.
pub fn find_docx_files(input: &InputSource) -> Vec<PathBuf> {
    match input {
        InputSource::SingleFile(path) => {
            if is_docx(path) {
                vec![path.clone()]
            } else {
                warn!("File {} is not a .docx file", path.display());
                vec![]
            }
        }
        InputSource::Directory(dir) => {
            let mut files: Vec<PathBuf> = WalkDir::new(dir)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| is_docx(p))
                .collect();
            files.sort();
            info!("Found {} .docx file(s) in {}", files.len(), dir.display());
            files
        }
    }
}

fn is_docx(path: &Path) -> bool {
    let locked = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with(OFFICE_LOCK_PREFIX))
        .unwrap_or(false);
    !locked && extension_lowercase(path).as_deref() == Some("docx")
}

/// Lists the `.md` corpus in `dir`, sorted by filename.
///
/// Distinguishes "bad input" (missing path, not a directory) from "empty
/// batch": an empty list is returned, not an error, and the caller decides
/// whether that is fatal.
pub fn find_markdown_files(dir: &Path) -> Result<Vec<PathBuf>, MaterialError> {
    if !dir.exists() {
        return Err(MaterialError::NotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(MaterialError::NotADirectory(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|source| MaterialError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && extension_lowercase(p).as_deref() == Some("md"))
        .collect();
    files.sort();
    Ok(files)
}
