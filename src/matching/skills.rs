//! Skill vocabulary and substring-based skill extraction

use crate::error::{JobMatcherError, Result};
use aho_corasick::AhoCorasick;
use std::collections::BTreeSet;

/// Skills found in a single document. Always a subset of the vocabulary.
pub type SkillSet = BTreeSet<String>;

/// Technical and soft skills recognized by default
const DEFAULT_SKILLS: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "c++", "php", "ruby", "go", "rust",
    // Web technologies
    "html", "css", "react", "angular", "vue", "node.js", "django", "flask",
    // Databases
    "mysql", "postgresql", "mongodb", "sqlite", "oracle", "redis",
    // Tools and cloud
    "git", "docker", "kubernetes", "jenkins", "aws", "azure", "gcp",
    // Concepts
    "machine learning", "data science", "artificial intelligence", "deep learning",
    // Soft skills
    "project management", "agile", "scrum", "leadership", "communication",
];

/// Immutable, lower-cased set of known skills.
///
/// Matching is plain substring containment on the lower-cased text, so short
/// entries such as `go` also hit inside longer words (`algorithm`).
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    entries: Vec<String>,
    matcher: AhoCorasick,
}

impl SkillVocabulary {
    /// Build a vocabulary from arbitrary entries. Entries are lower-cased and
    /// deduplicated, keeping first-seen order.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let mut ordered = Vec::new();

        for entry in entries {
            let skill = entry.as_ref().trim().to_lowercase();
            if skill.is_empty() {
                return Err(JobMatcherError::InvalidInput(
                    "Skill vocabulary entries must not be empty".to_string(),
                ));
            }
            if seen.insert(skill.clone()) {
                ordered.push(skill);
            }
        }

        if ordered.is_empty() {
            return Err(JobMatcherError::InvalidInput(
                "Skill vocabulary must contain at least one entry".to_string(),
            ));
        }

        // Standard match kind so overlapping iteration reports every entry
        // occurring anywhere in the text.
        let matcher = AhoCorasick::new(&ordered)
            .map_err(|e| JobMatcherError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            entries: ordered,
            matcher,
        })
    }

    /// Default vocabulary extended with additional skills
    pub fn with_extra_skills(extra: &[String]) -> Result<Self> {
        Self::new(
            DEFAULT_SKILLS
                .iter()
                .map(|s| s.to_string())
                .chain(extra.iter().cloned()),
        )
    }

    /// Extract every vocabulary entry contained in `text` (case-insensitive)
    pub fn extract(&self, text: &str) -> SkillSet {
        if text.trim().is_empty() {
            return SkillSet::new();
        }

        let lowered = text.to_lowercase();
        self.matcher
            .find_overlapping_iter(&lowered)
            .map(|mat| self.entries[mat.pattern().as_usize()].clone())
            .collect()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.entries.iter().any(|entry| entry == skill)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied()).expect("Default skill vocabulary is valid")
    }
}

/// Extract the skills of `vocabulary` found in `text`
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
    vocabulary.extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let vocab = SkillVocabulary::default();
        assert_eq!(vocab.len(), DEFAULT_SKILLS.len());
        assert!(vocab.contains("node.js"));
        assert!(vocab.contains("machine learning"));
    }

    #[test]
    fn test_empty_text_yields_no_skills() {
        let vocab = SkillVocabulary::default();
        assert!(extract_skills("", &vocab).is_empty());
        assert!(extract_skills("   \n\t ", &vocab).is_empty());
    }

    #[test]
    fn test_case_insensitive_extraction() {
        let vocab = SkillVocabulary::default();
        let skills = extract_skills("Senior PYTHON engineer, Docker and AWS. Machine Learning a plus", &vocab);

        assert!(skills.contains("python"));
        assert!(skills.contains("docker"));
        assert!(skills.contains("aws"));
        assert!(skills.contains("machine learning"));
    }

    #[test]
    fn test_substring_semantics_are_preserved() {
        let vocab = SkillVocabulary::default();

        // "go" inside "algorithm", "java" inside "javascript"
        let skills = extract_skills("algorithm design in javascript", &vocab);
        assert!(skills.contains("go"));
        assert!(skills.contains("java"));
        assert!(skills.contains("javascript"));
    }

    #[test]
    fn test_punctuated_entries_need_raw_text() {
        let vocab = SkillVocabulary::default();
        assert!(extract_skills("Node.js and C++", &vocab).contains("node.js"));
        assert!(extract_skills("Node.js and C++", &vocab).contains("c++"));
        assert!(!extract_skills("node js and c", &vocab).contains("node.js"));
    }

    #[test]
    fn test_result_is_subset_of_vocabulary() {
        let vocab = SkillVocabulary::default();
        let text = "Rust, Go, Kubernetes, leadership, scrum master, redis cache, gcp and azure";
        for skill in extract_skills(text, &vocab) {
            assert!(vocab.contains(&skill), "{} not in vocabulary", skill);
        }
    }

    #[test]
    fn test_extra_skills_are_normalized() {
        let vocab = SkillVocabulary::with_extra_skills(&["  Terraform ".to_string(), "python".to_string()]).unwrap();
        assert_eq!(vocab.len(), DEFAULT_SKILLS.len() + 1);
        assert!(extract_skills("terraform modules", &vocab).contains("terraform"));
    }

    #[test]
    fn test_invalid_vocabulary() {
        assert!(SkillVocabulary::new(Vec::<String>::new()).is_err());
        assert!(SkillVocabulary::new(vec!["python", " "]).is_err());
    }
}
