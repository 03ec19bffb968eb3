//! Composite resume-to-job match scoring

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::matching::education::match_education;
use crate::matching::experience::match_experience;
use crate::matching::similarity::TfidfSimilarity;
use crate::matching::skills::{SkillSet, SkillVocabulary};
use crate::matching::text::normalize;
use crate::matching::weights::MatchWeights;
use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

lazy_static! {
    static ref DEFAULT_SCORER: MatchScorer = MatchScorer::default();
}

/// Score breakdown for one resume/job pair. All scores are percentages
/// rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub final_score: f64,
    pub skills_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub text_similarity_score: f64,
    /// Job skills also found in the resume
    pub matched_skills: Vec<String>,
    /// Job skills absent from the resume
    pub missing_skills: Vec<String>,
}

/// Scores resumes against job postings with a shared vocabulary and weights
#[derive(Debug, Clone)]
pub struct MatchScorer {
    vocabulary: Arc<SkillVocabulary>,
    weights: MatchWeights,
    similarity: TfidfSimilarity,
}

impl MatchScorer {
    pub fn new(vocabulary: Arc<SkillVocabulary>, weights: MatchWeights, similarity: TfidfSimilarity) -> Self {
        Self {
            vocabulary,
            weights,
            similarity,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        let vocabulary = SkillVocabulary::with_extra_skills(&config.extra_skills)?;
        let weights = config.weights()?;
        let similarity = TfidfSimilarity::new(config.max_features)?;
        Ok(Self::new(Arc::new(vocabulary), weights, similarity))
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    pub fn extract_skills(&self, text: &str) -> SkillSet {
        self.vocabulary.extract(text)
    }

    /// Score a resume against a job's description and requirements.
    ///
    /// Resume skills come from the normalized resume while job skills come
    /// from the raw job text, so entries containing punctuation (`node.js`,
    /// `c++`) can only ever show up as missing.
    pub fn calculate_match_score(&self, resume_text: &str, job_description: &str, job_requirements: &str) -> MatchResult {
        let raw_job = format!("{} {}", job_description, job_requirements);
        let resume_clean = normalize(resume_text);
        let job_clean = normalize(&raw_job);

        let resume_skills = self.vocabulary.extract(&resume_clean);
        let job_skills = self.vocabulary.extract(&raw_job);

        let matched_skills: Vec<String> = job_skills.intersection(&resume_skills).cloned().collect();
        let missing_skills: Vec<String> = job_skills.difference(&resume_skills).cloned().collect();

        // No recognizable job skills means no skill credit
        let skill_overlap = if job_skills.is_empty() {
            0.0
        } else {
            matched_skills.len() as f64 / job_skills.len() as f64
        };

        let experience = match_experience(&resume_clean, &job_clean);
        let education = match_education(&resume_clean, &job_clean);
        let text_similarity = self.similarity.similarity(&resume_clean, &job_clean);

        let final_score = self.weights.combine(skill_overlap, experience, education, text_similarity) * 100.0;

        debug!(
            "Match scored: skills={:.3} experience={:.3} education={:.1} similarity={:.3} final={:.2}",
            skill_overlap, experience, education, text_similarity, final_score
        );

        MatchResult {
            final_score: round2(final_score),
            skills_score: round2(skill_overlap * 100.0),
            experience_score: round2(experience * 100.0),
            education_score: round2(education * 100.0),
            text_similarity_score: round2(text_similarity * 100.0),
            matched_skills,
            missing_skills,
        }
    }
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self::new(
            Arc::new(SkillVocabulary::default()),
            MatchWeights::default(),
            TfidfSimilarity::default(),
        )
    }
}

/// Score with the default vocabulary and weights
pub fn calculate_match_score(resume_text: &str, job_description: &str, job_requirements: &str) -> MatchResult {
    DEFAULT_SCORER.calculate_match_score(resume_text, job_description, job_requirements)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::weights::DEFAULT_WEIGHTS;

    fn is_two_decimals(value: f64) -> bool {
        ((value * 100.0).round() - value * 100.0).abs() < 1e-6
    }

    fn weighted_sum(result: &MatchResult) -> f64 {
        DEFAULT_WEIGHTS.combine(
            result.skills_score / 100.0,
            result.experience_score / 100.0,
            result.education_score / 100.0,
            result.text_similarity_score / 100.0,
        ) * 100.0
    }

    #[test]
    fn test_backend_role_breakdown() {
        let resume = "Python developer with 5 years experience in Django, Flask, MySQL. Master's in Computer Science.";
        let result = calculate_match_score(
            resume,
            "Python backend role, 3 years experience needed",
            "Python, Django, MySQL required, Bachelor's degree",
        );

        assert_eq!(result.skills_score, 100.0);
        assert_eq!(result.experience_score, 100.0);
        // master vs {bachelor, degree}: no shared term
        assert_eq!(result.education_score, 0.0);
        for skill in ["python", "django", "mysql"] {
            assert!(result.matched_skills.contains(&skill.to_string()));
        }
        assert!(result.missing_skills.is_empty());
        assert!(result.text_similarity_score > 0.0);
    }

    #[test]
    fn test_empty_job_scores_fifty() {
        let result = calculate_match_score("Rust engineer, 7 years, PhD in physics", "", "");

        assert_eq!(result.skills_score, 0.0);
        assert_eq!(result.experience_score, 100.0);
        assert_eq!(result.education_score, 100.0);
        assert_eq!(result.text_similarity_score, 0.0);
        assert_eq!(result.final_score, 50.0);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_identical_texts() {
        let text = "Python and Docker engineer with 4 years on AWS";
        let result = calculate_match_score(text, text, "");

        assert_eq!(result.text_similarity_score, 100.0);
        assert_eq!(result.skills_score, 100.0);
        assert_eq!(result.final_score, 100.0);
    }

    #[test]
    fn test_identical_texts_without_skills() {
        let text = "Gardening enthusiast who loves tomatoes";
        let result = calculate_match_score(text, text, "");

        assert_eq!(result.skills_score, 0.0);
        assert_eq!(result.text_similarity_score, 100.0);
        assert_eq!(result.final_score, 60.0);
    }

    #[test]
    fn test_missing_skills_are_job_minus_resume() {
        let result = calculate_match_score(
            "Java developer, Kubernetes",
            "Looking for Java, Kubernetes and Terraform on Azure",
            "",
        );

        assert!(result.matched_skills.contains(&"java".to_string()));
        assert!(result.matched_skills.contains(&"kubernetes".to_string()));
        assert_eq!(result.missing_skills, vec!["azure".to_string()]);
    }

    #[test]
    fn test_punctuated_skills_are_always_missing() {
        let result = calculate_match_score("Node.js expert", "Node.js role", "");
        assert!(result.missing_skills.contains(&"node.js".to_string()));
    }

    #[test]
    fn test_final_score_matches_weighted_sum() {
        let cases = [
            ("Python dev, 2 years, bachelor", "Python and Go developer with 6 years", "bachelor degree"),
            ("", "", ""),
            ("scrum master, agile coach", "Agile leadership role", "10 years"),
            ("Data science and machine learning, 3 year", "Deep learning researcher", "PhD, 5 years"),
        ];

        for (resume, description, requirements) in cases {
            let result = calculate_match_score(resume, description, requirements);
            assert!((0.0..=100.0).contains(&result.final_score));
            assert!(is_two_decimals(result.final_score));
            assert!(is_two_decimals(result.skills_score));
            assert!(is_two_decimals(result.text_similarity_score));
            assert!((result.final_score - weighted_sum(&result)).abs() <= 0.01 + 1e-9);
        }
    }

    #[test]
    fn test_custom_weights() {
        let weights = MatchWeights::new(0.0, 0.0, 1.0, 0.0).unwrap();
        let scorer = MatchScorer::new(
            Arc::new(SkillVocabulary::default()),
            weights,
            TfidfSimilarity::default(),
        );

        let result = scorer.calculate_match_score("no degree here", "diploma required", "");
        assert_eq!(result.final_score, 0.0);

        let result = scorer.calculate_match_score("diploma in arts", "diploma required", "");
        assert_eq!(result.final_score, 100.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(100.0), 100.0);
    }
}
