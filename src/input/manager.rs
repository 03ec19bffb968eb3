//! Input manager for resumes, job descriptions and job pools

use crate::error::{JobMatcherError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use crate::matching::job::JobPosting;
use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

/// Accepted layouts of a job pool file
#[derive(Deserialize)]
#[serde(untagged)]
enum JobPoolFile {
    List(Vec<serde_json::Value>),
    Wrapped { jobs: Vec<serde_json::Value> },
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a text or markdown document as plain text
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        Self::ensure_exists(path)?;

        let text = match self.detect_file_type(path)? {
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Json | FileType::Unknown => {
                return Err(JobMatcherError::UnsupportedFormat(format!(
                    "Unsupported document type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Load a JSON job pool: either an array of postings or `{"jobs": [...]}`.
    ///
    /// A posting without a description is rejected with the offending index.
    pub async fn load_job_pool(&self, path: &Path) -> Result<Vec<JobPosting>> {
        Self::ensure_exists(path)?;

        if self.detect_file_type(path)? != FileType::Json {
            return Err(JobMatcherError::UnsupportedFormat(format!(
                "Job pools must be JSON files: {}",
                path.display()
            )));
        }

        let content = tokio::fs::read_to_string(path).await?;
        let jobs = parse_job_pool(&content)?;

        if jobs.is_empty() {
            warn!("Job pool {} is empty", path.display());
        } else {
            info!("Loaded {} jobs from {}", jobs.len(), path.display());
        }

        Ok(jobs)
    }

    fn ensure_exists(path: &Path) -> Result<()> {
        if path.exists() {
            Ok(())
        } else {
            Err(JobMatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )))
        }
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                JobMatcherError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse job postings from JSON text
pub fn parse_job_pool(content: &str) -> Result<Vec<JobPosting>> {
    let entries = match serde_json::from_str::<JobPoolFile>(content)? {
        JobPoolFile::List(entries) => entries,
        JobPoolFile::Wrapped { jobs } => jobs,
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<JobPosting>(value)
                .map_err(|e| JobMatcherError::InvalidInput(format!("Job #{}: {}", index, e)))
        })
        .collect()
}
