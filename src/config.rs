//! Configuration management for the job matcher

use crate::error::{JobMatcherError, Result};
use crate::matching::ranking::{default_parallelism, RankingOptions};
use crate::matching::similarity::DEFAULT_MAX_FEATURES;
use crate::matching::weights::{MatchWeights, DEFAULT_WEIGHTS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub ranking: RankingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub skills_weight: f64,
    pub experience_weight: f64,
    pub education_weight: f64,
    pub text_similarity_weight: f64,
    /// Vocabulary cap of the TF-IDF similarity
    pub max_features: usize,
    /// Skills recognized in addition to the built-in vocabulary
    pub extra_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub limit: usize,
    pub min_score: f64,
    pub parallelism: usize,
    /// Drop postings that say they are closed or filled
    pub skip_closed: bool,
    /// Drop postings that mention none of the resume's skills
    pub require_skill_match: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skills_weight: DEFAULT_WEIGHTS.skills,
            experience_weight: DEFAULT_WEIGHTS.experience,
            education_weight: DEFAULT_WEIGHTS.education,
            text_similarity_weight: DEFAULT_WEIGHTS.text_similarity,
            max_features: DEFAULT_MAX_FEATURES,
            extra_skills: Vec::new(),
        }
    }
}

impl ScoringConfig {
    /// Validated match weights
    pub fn weights(&self) -> Result<MatchWeights> {
        MatchWeights::new(
            self.skills_weight,
            self.experience_weight,
            self.education_weight,
            self.text_similarity_weight,
        )
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            limit: 50,
            min_score: 0.0,
            parallelism: default_parallelism(),
            skip_closed: true,
            require_skill_match: false,
        }
    }
}

impl RankingConfig {
    pub fn options(&self) -> RankingOptions {
        RankingOptions {
            limit: self.limit,
            min_score: self.min_score,
            parallelism: self.parallelism.max(1),
            skip_closed: self.skip_closed,
            require_skill_match: self.require_skill_match,
            query: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Console
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(JobMatcherError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| JobMatcherError::Configuration(format!("Failed to parse config: {}", e)))?;

        // Fail early on weights that do not add up
        config.scoring.weights()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| JobMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-matcher")
            .join("config.toml")
    }
}
