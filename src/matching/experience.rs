//! Years-of-experience matching

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Also matches "years", "year's" etc: only the "year" prefix is required.
    static ref YEARS_PATTERN: Regex = Regex::new(r"([0-9]+)\s+year").expect("Invalid years regex");
}

/// Largest "<N> year" mention in the text, 0 when there is none
pub fn extract_years(text: &str) -> u64 {
    let lowered = text.to_lowercase();
    YEARS_PATTERN
        .captures_iter(&lowered)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .max()
        .unwrap_or(0)
}

/// Ratio of resume years to required years, capped at 1.0.
/// A job that states no requirement gives full credit.
pub fn match_experience(resume_text: &str, job_text: &str) -> f64 {
    let job_years = extract_years(job_text);
    if job_years == 0 {
        return 1.0;
    }

    let resume_years = extract_years(resume_text);
    (resume_years as f64 / job_years as f64).min(1.0)
}
