//! Keyword search relevance of a job posting

use crate::matching::job::JobPosting;

/// Query words that earn an extra bonus when the posting mentions them
const TECH_KEYWORDS: &[&str] = &[
    "python", "javascript", "react", "node", "java", "sql", "aws", "docker",
    "kubernetes", "machine learning", "data science", "ai", "frontend", "backend",
    "full stack", "devops",
];

const TITLE_PHRASE_BONUS: f64 = 50.0;
const TITLE_WORD_BONUS: f64 = 10.0;
const TEXT_WORD_BONUS: f64 = 5.0;
const TEXT_WORD_CAP: f64 = 30.0;
const COMPANY_BONUS: f64 = 20.0;
const TECH_WORD_BONUS: f64 = 15.0;

/// Relevance (0-100) of a posting to a free-text search query.
///
/// An empty query is fully relevant. Query words of two characters or fewer
/// are ignored for the per-word bonuses.
pub fn search_relevance(job: &JobPosting, query: &str) -> f64 {
    if query.is_empty() {
        return 100.0;
    }

    let query = query.to_lowercase();
    let title = job.title.to_lowercase();
    let company = job.company.to_lowercase();
    let job_text = format!("{} {}", job.search_text(), company);

    let words: Vec<&str> = query
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .collect();

    let mut score = 0.0;

    if title.contains(&query) {
        score += TITLE_PHRASE_BONUS;
    }

    score += words.iter().filter(|word| title.contains(**word)).count() as f64 * TITLE_WORD_BONUS;

    let text_matches = words.iter().filter(|word| job_text.contains(**word)).count() as f64;
    score += (text_matches * TEXT_WORD_BONUS).min(TEXT_WORD_CAP);

    if company.contains(&query) {
        score += COMPANY_BONUS;
    }

    score += words
        .iter()
        .filter(|word| TECH_KEYWORDS.contains(*word) && job_text.contains(**word))
        .count() as f64
        * TECH_WORD_BONUS;

    score.min(100.0)
}
