//! TF-IDF cosine similarity fitted on the two compared documents

use crate::error::{JobMatcherError, Result};
use crate::matching::stop_words::ENGLISH_STOP_WORDS;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Vocabulary cap used when none is configured
pub const DEFAULT_MAX_FEATURES: usize = 1000;

lazy_static! {
    static ref DEFAULT_SIMILARITY: TfidfSimilarity =
        TfidfSimilarity::new(DEFAULT_MAX_FEATURES).expect("Default TF-IDF settings are valid");
}

/// TF-IDF vectorizer over unigrams and bigrams with English stop words
/// removed. Every call fits a fresh vocabulary on just the two documents, so
/// idf weights are local to the pair.
#[derive(Debug, Clone)]
pub struct TfidfSimilarity {
    stop_words: HashSet<&'static str>,
    token_regex: Regex,
    max_features: usize,
}

impl TfidfSimilarity {
    pub fn new(max_features: usize) -> Result<Self> {
        if max_features == 0 {
            return Err(JobMatcherError::InvalidInput(
                "TF-IDF max_features must be greater than zero".to_string(),
            ));
        }

        let token_regex = Regex::new(r"\b\w\w+\b")
            .map_err(|e| JobMatcherError::Processing(format!("Invalid token regex: {}", e)))?;

        Ok(Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            token_regex,
            max_features,
        })
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Cosine similarity of the two documents' TF-IDF vectors in [0, 1].
    /// Degenerate inputs (empty text, nothing but stop words) give 0.0.
    pub fn similarity(&self, left: &str, right: &str) -> f64 {
        let left_counts = self.term_counts(left);
        let right_counts = self.term_counts(right);

        let features = self.select_features(&left_counts, &right_counts);
        if features.is_empty() {
            debug!("TF-IDF vocabulary is empty, similarity is 0");
            return 0.0;
        }

        let left_vec = Self::weigh(&features, &left_counts, &right_counts);
        let right_vec = Self::weigh(&features, &right_counts, &left_counts);

        cosine(&left_vec, &right_vec)
    }

    /// Tokens of two or more word characters, stop words removed, followed by
    /// the bigrams of the remaining token sequence
    fn analyze(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = self
            .token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(token))
            .collect();

        let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
        terms
    }

    fn term_counts(&self, text: &str) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for term in self.analyze(text) {
            *counts.entry(term).or_insert(0) += 1;
        }
        counts
    }

    /// Keep the `max_features` terms with the highest corpus frequency,
    /// breaking ties alphabetically
    fn select_features<'a>(
        &self,
        left: &'a HashMap<String, usize>,
        right: &'a HashMap<String, usize>,
    ) -> Vec<&'a str> {
        let mut totals: HashMap<&str, usize> = HashMap::new();
        for (term, count) in left.iter().chain(right.iter()) {
            *totals.entry(term.as_str()).or_insert(0) += count;
        }

        let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        ranked.into_iter().map(|(term, _)| term).collect()
    }

    /// Raw term count times smoothed idf over the two-document corpus
    fn weigh(features: &[&str], own: &HashMap<String, usize>, other: &HashMap<String, usize>) -> Vec<f64> {
        const N_DOCS: f64 = 2.0;

        features
            .iter()
            .map(|term| {
                let tf = own.get(*term).copied().unwrap_or(0) as f64;
                if tf == 0.0 {
                    return 0.0;
                }
                let df = 1.0 + if other.contains_key(*term) { 1.0 } else { 0.0 };
                let idf = ((1.0 + N_DOCS) / (1.0 + df)).ln() + 1.0;
                tf * idf
            })
            .collect()
    }
}

impl Default for TfidfSimilarity {
    fn default() -> Self {
        DEFAULT_SIMILARITY.clone()
    }
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// TF-IDF cosine similarity with the default settings
pub fn text_similarity(resume_text: &str, job_text: &str) -> f64 {
    DEFAULT_SIMILARITY.similarity(resume_text, job_text)
}
