mod compose;
mod config;
mod convert;
mod errors;
mod letter;
mod llm_client;
mod materials;
mod packet;
mod redaction;
mod render;
mod storage;
mod style_guide;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compose::MissingRoles;
use crate::config::Config;
use crate::llm_client::LlmClient;

const USAGE: &str = "\
Letter of recommendation tools

Usage:
  lor redact <path> [out_dir] [--dry-run]
      Redact student information from a .docx file or a directory of them.
  lor extract-style <redacted_dir> [out_dir]
      Derive a style guide from a directory of redacted .md letters.
  lor synthesize-packet <student_dir> [--omit-missing]
      Build <student_dir>/student_packet.md from <student_dir>/input/.
  lor generate-letter <student_dir> <style_guide> [--output <name>] [--docx]
      Draft a letter from the packet and style guide into <student_dir>/output/.
";

fn main() -> ExitCode {
    // Load configuration first (fails on missing required env vars)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match dispatch(&config, &args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(config: &Config, args: &[String]) -> anyhow::Result<ExitCode> {
    let Some(command) = args.first() else {
        return Ok(usage());
    };
    let rest = &args[1..];

    match command.as_str() {
        "redact" => {
            let (positional, flags) = split_flags(rest);
            let Some(in_path) = positional.first().map(PathBuf::from) else {
                return Ok(usage());
            };
            let out_dir = positional
                .get(1)
                .map(PathBuf::from)
                .unwrap_or_else(|| default_redaction_out_dir(&in_path));
            let dry_run = flags.iter().any(|f| f.as_str() == "--dry-run");

            let llm = LlmClient::new(config.anthropic_api_key.clone());
            let report = redaction::run(config, &llm, &in_path, &out_dir, dry_run)?;
            if report.failed > 0 {
                error!(
                    "{} of {} document(s) failed",
                    report.failed,
                    report.succeeded + report.failed
                );
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        "extract-style" => {
            let (positional, _) = split_flags(rest);
            let Some(redacted_dir) = positional.first().map(PathBuf::from) else {
                return Ok(usage());
            };
            let out_dir = positional
                .get(1)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));

            let llm = LlmClient::new(config.anthropic_api_key.clone());
            let path = style_guide::run(config, &llm, &redacted_dir, &out_dir)?;
            info!("Style guide written to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        "synthesize-packet" => {
            let (positional, flags) = split_flags(rest);
            let Some(student_dir) = positional.first().map(PathBuf::from) else {
                return Ok(usage());
            };
            let missing = if flags.iter().any(|f| f.as_str() == "--omit-missing") {
                MissingRoles::Omit
            } else {
                MissingRoles::Placeholder
            };

            let llm = LlmClient::new(config.anthropic_api_key.clone());
            let path = packet::run(config, &llm, &student_dir, missing)?;
            info!("Student packet written to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        "generate-letter" => {
            let (positional, flags) = split_flags(rest);
            let (Some(student_dir), Some(style_guide_path)) = (
                positional.first().map(PathBuf::from),
                positional.get(1).map(PathBuf::from),
            ) else {
                return Ok(usage());
            };
            let output_filename = flag_value(rest, "--output")
                .unwrap_or_else(|| letter::DEFAULT_OUTPUT_FILENAME.to_string());
            let render_docx = flags.iter().any(|f| f.as_str() == "--docx");

            let llm = LlmClient::new(config.anthropic_api_key.clone());
            let path = letter::run(
                config,
                &llm,
                &student_dir,
                &style_guide_path,
                &output_filename,
                render_docx,
            )?;
            info!("Letter draft written to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        "--help" | "-h" | "help" => {
            print!("{USAGE}");
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(usage()),
    }
}

fn usage() -> ExitCode {
    eprint!("{USAGE}");
    ExitCode::from(2)
}

/// Splits arguments into positionals and `--` flags. `--output <name>` is the
/// one value-carrying flag; its value is consumed with it.
fn split_flags(args: &[String]) -> (Vec<&String>, Vec<&String>) {
    let mut positional = Vec::new();
    let mut flags = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            flags.push(arg);
            if arg == "--output" {
                iter.next();
            }
        } else {
            positional.push(arg);
        }
    }
    (positional, flags)
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Redacted output lands next to the input unless an out_dir is given.
fn default_redaction_out_dir(in_path: &Path) -> PathBuf {
    if in_path.is_file() {
        in_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        in_path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_flags_separates_positionals() {
        let args = strings(&["letters", "out", "--dry-run"]);
        let (positional, flags) = split_flags(&args);
        assert_eq!(positional, vec!["letters", "out"]);
        assert_eq!(flags, vec!["--dry-run"]);
    }

    #[test]
    fn test_split_flags_consumes_output_value() {
        let args = strings(&["student", "guide.md", "--output", "final.md", "--docx"]);
        let (positional, flags) = split_flags(&args);
        assert_eq!(positional, vec!["student", "guide.md"]);
        assert_eq!(flags, vec!["--output", "--docx"]);
        assert_eq!(flag_value(&args, "--output"), Some("final.md".to_string()));
    }

    #[test]
    fn test_flag_value_missing_flag_is_none() {
        let args = strings(&["student", "guide.md"]);
        assert_eq!(flag_value(&args, "--output"), None);
    }
}
