//! Ranking a pool of job postings for one resume

use crate::error::Result;
use crate::matching::job::JobPosting;
use crate::matching::quick_score::{quick_score, skill_hits};
use crate::matching::relevance::search_relevance;
use crate::matching::scorer::{MatchResult, MatchScorer};
use crate::matching::text::normalize;
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Options controlling which scored jobs make it into the ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankingOptions {
    /// Maximum number of ranked jobs to keep
    pub limit: usize,
    /// Jobs scoring below this final score are dropped
    pub min_score: f64,
    /// Number of concurrent scoring tasks
    pub parallelism: usize,
    /// Skip postings that say they are closed or filled
    pub skip_closed: bool,
    /// Skip postings that mention none of the resume's skills
    pub require_skill_match: bool,
    /// Search query scored against each posting
    pub query: Option<String>,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            limit: 50,
            min_score: 0.0,
            parallelism: default_parallelism(),
            skip_closed: true,
            require_skill_match: false,
            query: None,
        }
    }
}

pub fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedJob {
    /// 1-based position in the ranking
    pub rank: usize,
    pub job: JobPosting,
    /// Skill-list pre-score, see [`quick_score`]
    pub quick_score: f64,
    /// Relevance to the search query, when one was given
    pub relevance: Option<f64>,
    pub result: MatchResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub generated_at: DateTime<Utc>,
    pub total_jobs: usize,
    /// Jobs dropped before scoring as closed or without a skill match
    pub skipped_jobs: usize,
    /// Highest final score over the scored jobs, before `min_score` and `limit`
    pub best_match_score: f64,
    /// Skills found in the normalized resume, as used for scoring
    pub resume_skills: Vec<String>,
    pub matches: Vec<RankedJob>,
    pub processing_time_ms: u64,
}

struct Scored {
    index: usize,
    job: JobPosting,
    quick_score: f64,
    relevance: Option<f64>,
    result: MatchResult,
}

/// Score every job against the resume and return them best first
pub async fn rank_jobs(
    scorer: Arc<MatchScorer>,
    resume_text: &str,
    jobs: Vec<JobPosting>,
    options: &RankingOptions,
) -> Result<RankingReport> {
    rank_jobs_with_progress(scorer, resume_text, jobs, options, None).await
}

/// [`rank_jobs`] reporting each scored job to `progress`
pub async fn rank_jobs_with_progress(
    scorer: Arc<MatchScorer>,
    resume_text: &str,
    jobs: Vec<JobPosting>,
    options: &RankingOptions,
    progress: Option<ProgressBar>,
) -> Result<RankingReport> {
    let start = Instant::now();
    let total_jobs = jobs.len();
    let resume_text: Arc<str> = Arc::from(resume_text);
    let resume_skills: Vec<String> = scorer.extract_skills(&normalize(&resume_text)).into_iter().collect();
    let user_skills = Arc::new(resume_skills.clone());
    let query: Option<Arc<str>> = options.query.as_deref().map(Arc::from);

    let jobs: Vec<(usize, JobPosting)> = jobs
        .into_iter()
        .enumerate()
        .filter(|(_, job)| {
            if options.skip_closed && !job.is_accepting_applications() {
                debug!("Skipping closed posting {}", job.label());
                return false;
            }
            if options.require_skill_match && skill_hits(&user_skills, job).is_empty() {
                debug!("Skipping {} with no matching skill", job.label());
                return false;
            }
            true
        })
        .collect();
    let skipped_jobs = total_jobs - jobs.len();

    if let Some(bar) = &progress {
        bar.set_length(jobs.len() as u64);
    }

    info!(
        "Ranking {} of {} jobs with {} scoring tasks",
        jobs.len(),
        total_jobs,
        options.parallelism.max(1)
    );

    let chunk_size = jobs.len().div_ceil(options.parallelism.max(1)).max(1);
    let mut handles = Vec::new();

    let mut remaining = jobs.into_iter().peekable();
    while remaining.peek().is_some() {
        let chunk: Vec<(usize, JobPosting)> = remaining.by_ref().take(chunk_size).collect();
        let scorer = Arc::clone(&scorer);
        let resume_text = Arc::clone(&resume_text);
        let user_skills = Arc::clone(&user_skills);
        let query = query.clone();
        let progress = progress.clone();

        handles.push(tokio::task::spawn_blocking(move || {
            chunk
                .into_iter()
                .map(|(index, job)| {
                    let result = scorer.calculate_match_score(&resume_text, &job.description, &job.requirements);
                    let quick = quick_score(&user_skills, &job);
                    let relevance = query.as_deref().map(|q| search_relevance(&job, q));
                    if let Some(bar) = &progress {
                        bar.inc(1);
                    }
                    Scored {
                        index,
                        job,
                        quick_score: quick,
                        relevance,
                        result,
                    }
                })
                .collect::<Vec<_>>()
        }));
    }

    let mut scored = Vec::with_capacity(total_jobs - skipped_jobs);
    for handle in handles {
        scored.extend(handle.await?);
    }

    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }

    // Input order first so ties keep it through the stable sort
    scored.sort_by_key(|entry| entry.index);

    let best_match_score = scored
        .iter()
        .map(|entry| entry.result.final_score)
        .fold(0.0, f64::max);

    scored.retain(|entry| entry.result.final_score >= options.min_score);
    scored.sort_by(|a, b| b.result.final_score.total_cmp(&a.result.final_score));
    scored.truncate(options.limit);

    let matches: Vec<RankedJob> = scored
        .into_iter()
        .enumerate()
        .map(|(position, entry)| RankedJob {
            rank: position + 1,
            job: entry.job,
            quick_score: entry.quick_score,
            relevance: entry.relevance,
            result: entry.result,
        })
        .collect();

    let processing_time_ms = start.elapsed().as_millis() as u64;
    info!(
        "Ranked {} of {} jobs in {}ms ({} skipped, best score {:.2})",
        matches.len(),
        total_jobs,
        processing_time_ms,
        skipped_jobs,
        best_match_score
    );

    Ok(RankingReport {
        generated_at: Utc::now(),
        total_jobs,
        skipped_jobs,
        best_match_score,
        resume_skills,
        matches,
        processing_time_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Python developer with 5 years experience in Django, Flask, MySQL and AWS. Bachelor degree.";

    fn pool() -> Vec<JobPosting> {
        vec![
            JobPosting::new("Chef", "Cook pasta in a busy kitchen", "3 years in restaurants").with_id("chef"),
            JobPosting::new("Python Developer", "Python Django backend on AWS", "MySQL, 3 years, bachelor degree").with_id("py"),
            JobPosting::new("Java Engineer", "Java and Kubernetes platform", "8 years, master").with_id("java"),
            JobPosting::new("Empty", "", "").with_id("empty"),
        ]
    }

    fn options(limit: usize, min_score: f64, parallelism: usize) -> RankingOptions {
        RankingOptions {
            limit,
            min_score,
            parallelism,
            ..RankingOptions::default()
        }
    }

    #[tokio::test]
    async fn test_ranks_best_first() {
        let scorer = Arc::new(MatchScorer::default());
        let report = rank_jobs(scorer, RESUME, pool(), &options(10, 0.0, 2)).await.unwrap();

        assert_eq!(report.total_jobs, 4);
        assert_eq!(report.matches.len(), 4);
        assert_eq!(report.matches[0].job.id.as_deref(), Some("py"));
        assert_eq!(report.matches[0].rank, 1);
        assert_eq!(report.best_match_score, report.matches[0].result.final_score);

        for pair in report.matches.windows(2) {
            assert!(pair[0].result.final_score >= pair[1].result.final_score);
        }
    }

    #[tokio::test]
    async fn test_limit_and_min_score() {
        let scorer = Arc::new(MatchScorer::default());
        let report = rank_jobs(Arc::clone(&scorer), RESUME, pool(), &options(1, 0.0, 4)).await.unwrap();
        assert_eq!(report.matches.len(), 1);

        let report = rank_jobs(scorer, RESUME, pool(), &options(10, 101.0, 4)).await.unwrap();
        assert!(report.matches.is_empty());
        assert!(report.best_match_score > 0.0);
    }

    #[tokio::test]
    async fn test_result_independent_of_parallelism() {
        let scorer = Arc::new(MatchScorer::default());
        let sequential = rank_jobs(Arc::clone(&scorer), RESUME, pool(), &options(10, 0.0, 1)).await.unwrap();
        let parallel = rank_jobs(scorer, RESUME, pool(), &options(10, 0.0, 8)).await.unwrap();

        let ids = |report: &RankingReport| -> Vec<Option<String>> {
            report.matches.iter().map(|m| m.job.id.clone()).collect()
        };
        assert_eq!(ids(&sequential), ids(&parallel));
    }

    #[tokio::test]
    async fn test_empty_pool() {
        let scorer = Arc::new(MatchScorer::default());
        let report = rank_jobs(scorer, RESUME, Vec::new(), &RankingOptions::default()).await.unwrap();

        assert_eq!(report.total_jobs, 0);
        assert_eq!(report.best_match_score, 0.0);
        assert!(report.matches.is_empty());
    }

    #[tokio::test]
    async fn test_quick_score_uses_resume_skills() {
        let scorer = Arc::new(MatchScorer::default());
        let report = rank_jobs(scorer, RESUME, pool(), &options(10, 0.0, 2)).await.unwrap();

        assert!(report.resume_skills.contains(&"python".to_string()));
        let python_job = report.matches.iter().find(|m| m.job.id.as_deref() == Some("py")).unwrap();
        assert!(python_job.quick_score > 0.0);
    }

    #[tokio::test]
    async fn test_closed_postings_are_skipped() {
        let scorer = Arc::new(MatchScorer::default());
        let mut jobs = pool();
        jobs.push(JobPosting::new("Python Developer", "Python Django. Position filled.", "").with_id("closed"));

        let report = rank_jobs(Arc::clone(&scorer), RESUME, jobs.clone(), &options(10, 0.0, 2)).await.unwrap();
        assert_eq!(report.total_jobs, 5);
        assert_eq!(report.skipped_jobs, 1);
        assert!(report.matches.iter().all(|m| m.job.id.as_deref() != Some("closed")));

        let keep_closed = RankingOptions {
            skip_closed: false,
            ..options(10, 0.0, 2)
        };
        let report = rank_jobs(scorer, RESUME, jobs, &keep_closed).await.unwrap();
        assert_eq!(report.skipped_jobs, 0);
        assert_eq!(report.matches.len(), 5);
    }

    #[tokio::test]
    async fn test_require_skill_match() {
        let scorer = Arc::new(MatchScorer::default());
        let only_matching = RankingOptions {
            require_skill_match: true,
            ..options(10, 0.0, 2)
        };
        let report = rank_jobs(scorer, RESUME, pool(), &only_matching).await.unwrap();

        let ids: Vec<&str> = report.matches.iter().filter_map(|m| m.job.id.as_deref()).collect();
        assert_eq!(ids, vec!["py"]);
        assert_eq!(report.skipped_jobs, 3);
    }

    #[tokio::test]
    async fn test_query_relevance() {
        let scorer = Arc::new(MatchScorer::default());
        let report = rank_jobs(Arc::clone(&scorer), RESUME, pool(), &options(10, 0.0, 2)).await.unwrap();
        assert!(report.matches.iter().all(|m| m.relevance.is_none()));

        let with_query = RankingOptions {
            query: Some("python developer".to_string()),
            ..options(10, 0.0, 2)
        };
        let report = rank_jobs(scorer, RESUME, pool(), &with_query).await.unwrap();
        let relevance = |id: &str| {
            report
                .matches
                .iter()
                .find(|m| m.job.id.as_deref() == Some(id))
                .and_then(|m| m.relevance)
        };
        assert_eq!(relevance("py"), Some(95.0));
        assert_eq!(relevance("chef"), Some(0.0));
    }

    #[tokio::test]
    async fn test_resume_skills_follow_scoring() {
        let scorer = Arc::new(MatchScorer::default());
        let resume = "Node.js and Python engineer";
        let jobs = vec![JobPosting::new("Backend", "Node.js services", "").with_id("node")];
        let report = rank_jobs(scorer, resume, jobs, &options(10, 0.0, 1)).await.unwrap();

        assert!(!report.resume_skills.contains(&"node.js".to_string()));
        assert!(report.matches[0].result.missing_skills.contains(&"node.js".to_string()));
    }
}
