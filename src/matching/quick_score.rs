//! Lightweight skill-list pre-score used alongside the detailed match

use crate::matching::job::JobPosting;

/// Title words that mark a technical role
const ROLE_KEYWORDS: &[&str] = &["developer", "engineer", "programmer", "analyst", "manager", "scientist"];

const TITLE_BONUS: f64 = 5.0;
const ROLE_BONUS: f64 = 2.0;

/// Candidate skills (lower-cased) mentioned in the title, description or
/// requirements. Skills of two characters or fewer never count.
pub fn skill_hits(user_skills: &[String], job: &JobPosting) -> Vec<String> {
    let job_text = job.search_text();

    user_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|skill| skill.chars().count() > 2 && job_text.contains(skill.as_str()))
        .collect()
}

/// Percentage of the candidate's skills mentioned anywhere in the posting,
/// plus bonuses for skills and role keywords in the title. Rounded to one
/// decimal, capped at 100.
pub fn quick_score(user_skills: &[String], job: &JobPosting) -> f64 {
    if user_skills.is_empty() {
        return 0.0;
    }

    let title = job.title.to_lowercase();
    let skills: Vec<String> = user_skills.iter().map(|s| s.trim().to_lowercase()).collect();
    let matched = skill_hits(&skills, job).len();

    let base = matched as f64 / skills.len() as f64 * 100.0;
    let title_bonus = skills.iter().filter(|skill| title.contains(skill.as_str())).count() as f64 * TITLE_BONUS;
    let role_bonus = ROLE_KEYWORDS.iter().filter(|kw| title.contains(**kw)).count() as f64 * ROLE_BONUS;

    let mut score = (base + title_bonus + role_bonus).min(100.0);
    if matched > 0 && score < 10.0 {
        score = 10.0 + matched as f64 * 5.0;
    }

    (score * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_skills() {
        let job = JobPosting::new("Python Developer", "python", "");
        assert_eq!(quick_score(&[], &job), 0.0);
    }

    #[test]
    fn test_base_and_bonuses() {
        let job = JobPosting::new("Python Developer", "Build APIs with Django", "");
        // 2 of 4 skills matched = 50, python in title +5, developer +2
        let score = quick_score(&skills(&["Python", "django", "rust", "kotlin"]), &job);
        assert_eq!(score, 57.0);
    }

    #[test]
    fn test_short_skills_do_not_count_as_matches() {
        let job = JobPosting::new("Platform", "we use go and c", "");
        assert_eq!(quick_score(&skills(&["go", "c"]), &job), 0.0);
    }

    #[test]
    fn test_skill_hits() {
        let job = JobPosting::new("Data Engineer", "Spark pipelines", "SQL and Go");
        let hits = skill_hits(&skills(&[" Spark ", "SQL", "go", "rust"]), &job);
        assert_eq!(hits, vec!["spark".to_string(), "sql".to_string()]);
    }

    #[test]
    fn test_capped_at_hundred() {
        let job = JobPosting::new("Rust Engineer Manager", "rust", "");
        assert_eq!(quick_score(&skills(&["rust"]), &job), 100.0);
    }

    #[test]
    fn test_minimum_score_floor() {
        let mut many = skills(&["python"]);
        many.extend((0..20).map(|i| format!("unknownskill{}", i)));
        let job = JobPosting::new("Support", "python scripting", "");
        // base 1/21 = 4.76 < 10, floor is 10 + 5
        assert_eq!(quick_score(&many, &job), 15.0);
    }
}
