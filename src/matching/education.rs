//! Education level gate

use std::collections::BTreeSet;

/// Education terms recognized in resumes and postings
pub const EDUCATION_TERMS: &[&str] = &["phd", "master", "bachelor", "associate", "diploma", "degree"];

/// Education terms contained in the text (case-insensitive substring match)
pub fn extract_education_terms(text: &str) -> BTreeSet<&'static str> {
    let lowered = text.to_lowercase();
    EDUCATION_TERMS
        .iter()
        .copied()
        .filter(|term| lowered.contains(term))
        .collect()
}

/// Binary education gate: 1.0 when the job names no education term or when
/// resume and job share at least one term, 0.0 otherwise. Degree levels are
/// not ranked against each other.
pub fn match_education(resume_text: &str, job_text: &str) -> f64 {
    let job_terms = extract_education_terms(job_text);
    if job_terms.is_empty() {
        return 1.0;
    }

    let resume_terms = extract_education_terms(resume_text);
    if job_terms.intersection(&resume_terms).next().is_some() {
        1.0
    } else {
        0.0
    }
}
