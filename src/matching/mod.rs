//! Resume to job matching and scoring

pub mod education;
pub mod experience;
pub mod job;
pub mod quick_score;
pub mod ranking;
pub mod relevance;
pub mod scorer;
pub mod similarity;
pub mod skills;
pub mod stop_words;
pub mod text;
pub mod weights;

pub use job::JobPosting;
pub use ranking::{rank_jobs, RankedJob, RankingOptions, RankingReport};
pub use relevance::search_relevance;
pub use scorer::{calculate_match_score, MatchResult, MatchScorer};
pub use skills::{extract_skills, SkillSet, SkillVocabulary};
pub use text::normalize;
pub use weights::MatchWeights;
