use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::skills::match_skills;
use super::weights::{Weights, RANKING_WEIGHTS};
use crate::similarity::SimilarityEngine;
use crate::{JobRequirements, ResumeFacts};

#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub weights: Weights,
    pub qualified_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: RANKING_WEIGHTS,
            qualified_threshold: env_qualified_threshold(),
        }
    }
}

/// Per-resume score decomposition; recomputed fresh every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill_score: f64,
    pub similarity_score: f64,
    pub experience_score: f64,
    pub final_score: f64,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
}

pub struct ScoringEngine {
    config: ScoringConfig,
    similarity: SimilarityEngine,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_similarity(config, SimilarityEngine::from_env())
    }

    pub fn with_similarity(config: ScoringConfig, similarity: SimilarityEngine) -> Self {
        Self { config, similarity }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Combine skill, similarity and experience scores into the weighted
    /// final score. Pure and side-effect-free per resume.
    pub fn analyze(&self, facts: &ResumeFacts, job: &JobRequirements) -> ScoreBreakdown {
        let skill = match_skills(&job.required_skills, &facts.skills);
        let similarity_score = self
            .similarity
            .score(&facts.normalized_text, &job.description);
        let experience_score = score_experience(facts.experience_years, job.min_experience_years);

        let weights = self.config.weights;
        let final_score = skill.score * weights.skills
            + similarity_score * weights.similarity
            + experience_score * weights.experience;

        ScoreBreakdown {
            skill_score: skill.score,
            similarity_score,
            experience_score,
            final_score,
            matched_skills: skill.matched,
            missing_skills: skill.missing,
        }
    }
}

/// Experience credit: no requirement or requirement met is full credit;
/// partial credit is proportional to closeness, except that zero stated
/// experience never earns partial credit.
pub fn score_experience(actual_years: u32, required_years: u32) -> f64 {
    if required_years == 0 {
        return 1.0;
    }
    if actual_years >= required_years {
        return 1.0;
    }
    if actual_years == 0 {
        return 0.0;
    }
    (actual_years as f64 / required_years as f64).min(1.0)
}

fn env_qualified_threshold() -> f64 {
    std::env::var("RR_QUALIFIED_THRESHOLD")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.5)
}
