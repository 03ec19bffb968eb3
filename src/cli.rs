//! CLI interface for the job matcher

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "job-matcher")]
#[command(about = "Resume to job posting matching and ranking")]
#[command(long_about = "Score a resume against job postings using skill overlap, experience, education and TF-IDF text similarity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: console, json, markdown
    #[arg(short, long, global = true)]
    pub format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a single job
    Score {
        /// Path to resume file (TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Path to job requirements file (TXT, MD)
        #[arg(long)]
        requirements: Option<PathBuf>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Rank a pool of jobs for a resume
    Rank {
        /// Path to resume file (TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to a JSON job pool
        #[arg(short, long)]
        jobs: PathBuf,

        /// Maximum number of jobs to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Drop jobs scoring below this value
        #[arg(long)]
        min_score: Option<f64>,

        /// Score each job's relevance to this search query
        #[arg(short, long)]
        query: Option<String>,

        /// Keep postings that say they are closed or filled
        #[arg(long)]
        include_closed: bool,

        /// Only rank postings that mention at least one resume skill
        #[arg(long)]
        require_skill_match: bool,

        /// Show score breakdowns and description previews
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// List the known skills found in a document
    Skills {
        /// Path to a TXT or MD document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Extract a structured profile from a resume
    Profile {
        /// Path to resume file (TXT, MD)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.TXT"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.pdf"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["txt"]).is_err());
    }

    #[test]
    fn test_cli_parses_rank() {
        let cli = Cli::try_parse_from([
            "job-matcher", "rank", "--resume", "cv.txt", "--jobs", "pool.json", "--limit", "5", "--format", "json",
            "--query", "rust developer", "--require-skill-match",
        ])
        .unwrap();

        assert_eq!(cli.format.as_deref(), Some("json"));
        match cli.command {
            Commands::Rank {
                limit,
                min_score,
                query,
                include_closed,
                require_skill_match,
                ..
            } => {
                assert_eq!(limit, Some(5));
                assert_eq!(min_score, None);
                assert_eq!(query.as_deref(), Some("rust developer"));
                assert!(!include_closed);
                assert!(require_skill_match);
            }
            _ => panic!("expected rank command"),
        }
    }
}
