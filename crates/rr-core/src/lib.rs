pub mod error;
pub mod extraction;
pub mod logging;
pub mod matching;
pub mod normalize;
pub mod report;
pub mod similarity;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use error::RankError;
pub use matching::pipeline::{RankingEngine, RankingOutcome};
pub use matching::scoring::{ScoreBreakdown, ScoringConfig, ScoringEngine};

// Commonly used data models for scoring and ranking.

/// Structured signals extracted from one resume. Immutable once built;
/// skill and education sets are lower-cased and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeFacts {
    pub filename: String,
    pub normalized_text: String,
    pub skills: BTreeSet<String>,
    pub experience_years: u32,
    pub education: BTreeSet<String>,
    pub contact: Contact,
}

/// Contact fields; a field without a match is `None`, never an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// One ranking request's job side. Skill order does not affect scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub min_experience_years: u32,
}

/// One row of the ranked output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub filename: String,
    pub experience_years: u32,
    pub total_skills: usize,
    pub contact: Contact,
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
}

/// Resume excluded from a batch, with the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedResume {
    pub filename: String,
    pub reason: String,
}

/// Aggregate view over a ranked batch; recomputed per request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub mean_score: f64,
    pub top_score: f64,
    pub qualified: usize,
}

/// Score a single resume against a job (job-seeker mode).
pub fn analyze_one(facts: &ResumeFacts, job: &JobRequirements) -> ScoreBreakdown {
    ScoringEngine::new(ScoringConfig::default()).analyze(facts, job)
}

/// Score and order a batch of resumes (reviewer mode).
pub fn rank_many(
    resumes: &[ResumeFacts],
    job: &JobRequirements,
) -> Result<RankingOutcome, RankError> {
    RankingEngine::new(ScoringConfig::default()).rank(resumes, job)
}

/// Improvement feedback for a scored resume.
pub fn suggest(
    skill_score: f64,
    similarity_score: f64,
    experience_score: f64,
    missing_skills: &BTreeSet<String>,
) -> Vec<String> {
    matching::feedback::suggest(skill_score, similarity_score, experience_score, missing_skills)
}
