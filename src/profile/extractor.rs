//! Resume profile extraction: contact details, skills, experience and education

use crate::matching::skills::SkillVocabulary;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").expect("Invalid email regex");
    static ref PHONE_REGEX: Regex =
        Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("Invalid phone regex");
    static ref LINKEDIN_REGEX: Regex =
        Regex::new(r"(?i)linkedin\.com/in/[\w\-]+").expect("Invalid LinkedIn regex");
    static ref DEGREE_REGEXES: Vec<Regex> = [
        r"bachelor['s]* (?:of )?(?:science|arts|engineering|business)",
        r"master['s]* (?:of )?(?:science|arts|engineering|business)",
        r"phd|ph\.d",
        r"doctorate",
        r"associate['s]* degree",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid degree regex"))
    .collect();
}

const EXPERIENCE_HEADERS: &[&str] = &[
    "experience",
    "work experience",
    "employment",
    "work history",
    "professional experience",
    "career",
    "positions",
];

/// Words that disqualify a line from being the candidate's name
const NON_NAME_WORDS: &[&str] = &["resume", "cv", "curriculum", "vitae", "email", "phone"];

/// Lines scanned after the experience header
const EXPERIENCE_WINDOW: usize = 10;
const MAX_EXPERIENCE_ITEMS: usize = 5;
const MIN_EXPERIENCE_LINE: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub personal_info: PersonalInfo,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
}

impl ResumeProfile {
    /// Extract a profile from resume text. Blank text gives an empty profile.
    pub fn from_text(text: &str, vocabulary: &SkillVocabulary) -> Self {
        if text.trim().is_empty() {
            return Self::default();
        }

        Self {
            personal_info: extract_personal_info(text),
            skills: vocabulary.extract(text).into_iter().collect(),
            experience: extract_experience(text),
            education: extract_education(text),
        }
    }

    pub fn total_skills(&self) -> usize {
        self.skills.len()
    }
}

pub fn extract_personal_info(text: &str) -> PersonalInfo {
    PersonalInfo {
        name: extract_name(text),
        email: EMAIL_REGEX.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE_REGEX.find(text).map(|m| m.as_str().to_string()),
        linkedin: LINKEDIN_REGEX.find(text).map(|m| m.as_str().to_string()),
    }
}

/// First line of two to four words that does not look like a heading
fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| {
            let words: Vec<&str> = line.split_whitespace().collect();
            line.chars().count() < 50
                && (2..=4).contains(&words.len())
                && !words
                    .iter()
                    .any(|word| NON_NAME_WORDS.contains(&word.to_lowercase().as_str()))
        })
        .map(str::to_string)
}

/// Up to five substantial lines following the first experience header
pub fn extract_experience(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();

    let Some(header) = lines.iter().position(|line| {
        let lowered = line.trim().to_lowercase();
        EXPERIENCE_HEADERS.iter().any(|keyword| lowered.contains(keyword))
    }) else {
        return Vec::new();
    };

    lines
        .iter()
        .skip(header + 1)
        .take(EXPERIENCE_WINDOW)
        .map(|line| line.trim())
        .filter(|line| line.chars().count() > MIN_EXPERIENCE_LINE)
        .take(MAX_EXPERIENCE_ITEMS)
        .map(str::to_string)
        .collect()
}

/// Degree mentions, in pattern order
pub fn extract_education(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    DEGREE_REGEXES
        .iter()
        .flat_map(|regex| regex.find_iter(&lowered).map(|m| m.as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Resume\nJane Q Doe\njane.doe@example.com | (555) 123-4567\nlinkedin.com/in/jane-doe\n\nProfessional Experience\nSenior engineer at Acme, built Rust services\nshort\nLed migration from Python 2 to Python 3\n\nEducation\nBachelor of Science in Computing, Master's of Engineering\n";

    #[test]
    fn test_personal_info() {
        let info = extract_personal_info(RESUME);
        assert_eq!(info.name.as_deref(), Some("Jane Q Doe"));
        assert_eq!(info.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(info.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(info.linkedin.as_deref(), Some("linkedin.com/in/jane-doe"));
    }

    #[test]
    fn test_experience_lines() {
        let experience = extract_experience(RESUME);
        assert_eq!(
            experience,
            vec![
                "Senior engineer at Acme, built Rust services".to_string(),
                "Led migration from Python 2 to Python 3".to_string(),
                "Bachelor of Science in Computing, Master's of Engineering".to_string(),
            ]
        );
    }

    #[test]
    fn test_experience_without_header() {
        assert!(extract_experience("Just a list\nof lines").is_empty());
    }

    #[test]
    fn test_education_mentions() {
        let education = extract_education(RESUME);
        assert_eq!(
            education,
            vec!["bachelor of science".to_string(), "master's of engineering".to_string()]
        );
        assert_eq!(extract_education("Ph.D in Biology"), vec!["ph.d".to_string()]);
    }

    #[test]
    fn test_profile_from_text() {
        let vocab = SkillVocabulary::default();
        let profile = ResumeProfile::from_text(RESUME, &vocab);

        assert!(profile.skills.contains(&"rust".to_string()));
        assert!(profile.skills.contains(&"python".to_string()));
        assert_eq!(profile.total_skills(), profile.skills.len());
    }

    #[test]
    fn test_blank_text() {
        let vocab = SkillVocabulary::default();
        assert_eq!(ResumeProfile::from_text("  \n ", &vocab), ResumeProfile::default());
    }
}
