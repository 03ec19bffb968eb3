//! Weights of the four scoring criteria

use crate::error::{JobMatcherError, Result};

const SUM_TOLERANCE: f64 = 1e-6;

/// Default composite weights
pub const DEFAULT_WEIGHTS: MatchWeights = MatchWeights {
    skills: 0.4,
    experience: 0.3,
    education: 0.2,
    text_similarity: 0.1,
};

/// Contribution of each criterion to the final score. Weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub text_similarity: f64,
}

impl MatchWeights {
    pub fn new(skills: f64, experience: f64, education: f64, text_similarity: f64) -> Result<Self> {
        let weights = Self {
            skills,
            experience,
            education,
            text_similarity,
        };

        let all = [skills, experience, education, text_similarity];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(JobMatcherError::Configuration(format!(
                "Match weights must be finite and non-negative: {:?}",
                weights
            )));
        }

        if (weights.sum() - 1.0).abs() > SUM_TOLERANCE {
            return Err(JobMatcherError::Configuration(format!(
                "Match weights must sum to 1.0, got {:.4}",
                weights.sum()
            )));
        }

        Ok(weights)
    }

    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.education + self.text_similarity
    }

    /// Weighted sum of sub-scores given in [0, 1]
    pub fn combine(&self, skills: f64, experience: f64, education: f64, text_similarity: f64) -> f64 {
        skills * self.skills
            + experience * self.experience
            + education * self.education
            + text_similarity * self.text_similarity
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!((DEFAULT_WEIGHTS.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert!(MatchWeights::new(0.5, 0.5, 0.5, 0.5).is_err());
        assert!(MatchWeights::new(1.2, -0.2, 0.0, 0.0).is_err());
        assert!(MatchWeights::new(f64::NAN, 0.3, 0.2, 0.1).is_err());
        assert!(MatchWeights::new(0.25, 0.25, 0.25, 0.25).is_ok());
    }

    #[test]
    fn test_combine() {
        let combined = DEFAULT_WEIGHTS.combine(0.0, 1.0, 1.0, 0.0);
        assert!((combined - 0.5).abs() < 1e-9);
    }
}
