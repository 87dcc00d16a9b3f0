use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::scoring::{ScoringConfig, ScoringEngine};
use crate::error::RankError;
use crate::{BatchSummary, JobRequirements, RankedResult, ResumeFacts, SkippedResume};

/// Ranked batch plus the diagnostics for anything that was dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub ranked: Vec<RankedResult>,
    pub skipped: Vec<SkippedResume>,
    pub summary: BatchSummary,
}

pub struct RankingEngine {
    scoring: ScoringEngine,
}

impl RankingEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            scoring: ScoringEngine::new(config),
        }
    }

    pub fn with_scoring(scoring: ScoringEngine) -> Self {
        Self { scoring }
    }

    /// Score each resume independently, then order by descending final
    /// score. The sort is stable, so resumes with equal scores keep
    /// their input order. A resume whose score computation misbehaves is
    /// skipped with a diagnostic instead of aborting the batch.
    pub fn rank(
        &self,
        resumes: &[ResumeFacts],
        job: &JobRequirements,
    ) -> Result<RankingOutcome, RankError> {
        if resumes.is_empty() {
            return Err(RankError::EmptyBatch);
        }

        let mut ranked = Vec::with_capacity(resumes.len());
        let mut skipped = Vec::new();

        for facts in resumes {
            let breakdown = self.scoring.analyze(facts, job);
            if !breakdown.final_score.is_finite() {
                tracing::warn!(
                    filename = %facts.filename,
                    "score computation produced a non-finite value; skipping resume"
                );
                skipped.push(SkippedResume {
                    filename: facts.filename.clone(),
                    reason: "score computation produced a non-finite value".to_string(),
                });
                continue;
            }

            ranked.push(RankedResult {
                filename: facts.filename.clone(),
                experience_years: facts.experience_years,
                total_skills: facts.skills.len(),
                contact: facts.contact.clone(),
                breakdown,
            });
        }

        if ranked.is_empty() {
            return Err(RankError::NothingProcessed { skipped });
        }

        ranked.sort_by(|a, b| {
            b.breakdown
                .final_score
                .partial_cmp(&a.breakdown.final_score)
                .unwrap_or(Ordering::Equal)
        });

        let summary = self.summarize(&ranked);
        Ok(RankingOutcome {
            ranked,
            skipped,
            summary,
        })
    }

    fn summarize(&self, ranked: &[RankedResult]) -> BatchSummary {
        let total = ranked.len();
        let mean_score =
            ranked.iter().map(|r| r.breakdown.final_score).sum::<f64>() / total as f64;
        let top_score = ranked
            .first()
            .map(|r| r.breakdown.final_score)
            .unwrap_or(0.0);
        let threshold = self.scoring.config().qualified_threshold;
        let qualified = ranked
            .iter()
            .filter(|r| r.breakdown.final_score > threshold)
            .count();

        BatchSummary {
            total,
            mean_score,
            top_score,
            qualified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::extract_facts;
    use crate::similarity::{SemanticModel, SimilarityEngine};

    fn rust_job() -> JobRequirements {
        JobRequirements {
            title: "Rust Engineer".into(),
            description: String::new(),
            required_skills: vec!["rust".into()],
            min_experience_years: 0,
        }
    }

    fn engine() -> RankingEngine {
        RankingEngine::with_scoring(ScoringEngine::with_similarity(
            ScoringConfig::default(),
            SimilarityEngine::new(),
        ))
    }

    // With an empty job description the similarity term is 0, so scores
    // are exact: rust + no experience requirement = 0.40 + 0.25 = 0.65.
    fn batch() -> Vec<ResumeFacts> {
        vec![
            extract_facts("a.txt", "rust services"),
            extract_facts("b.txt", "rust services"),
            extract_facts("c.txt", "accountant"),
        ]
    }

    #[test]
    fn sorts_descending_and_preserves_tie_order() {
        let outcome = engine().rank(&batch(), &rust_job()).unwrap();

        let names: Vec<_> = outcome.ranked.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
        assert_eq!(
            outcome.ranked[0].breakdown.final_score,
            outcome.ranked[1].breakdown.final_score
        );
        assert!(outcome.ranked[1].breakdown.final_score > outcome.ranked[2].breakdown.final_score);
    }

    #[test]
    fn summary_counts_mean_top_and_qualified() {
        let outcome = engine().rank(&batch(), &rust_job()).unwrap();
        let summary = &outcome.summary;

        assert_eq!(summary.total, 3);
        assert_eq!(summary.qualified, 2);
        assert!((summary.top_score - 0.65).abs() < 1e-9);
        let expected_mean = (0.65 + 0.65 + outcome.ranked[2].breakdown.final_score) / 3.0;
        assert!((summary.mean_score - expected_mean).abs() < 1e-9);
    }

    #[test]
    fn ranking_is_idempotent() {
        let resumes = batch();
        let engine = engine();
        let first = engine.rank(&resumes, &rust_job()).unwrap();
        let second = engine.rank(&resumes, &rust_job()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn qualified_threshold_is_configurable() {
        let config = ScoringConfig {
            qualified_threshold: 0.9,
            ..ScoringConfig::default()
        };
        let engine = RankingEngine::with_scoring(ScoringEngine::with_similarity(
            config,
            SimilarityEngine::new(),
        ));

        let outcome = engine.rank(&batch(), &rust_job()).unwrap();
        assert_eq!(outcome.summary.qualified, 0);
    }

    #[test]
    fn empty_batch_is_an_explicit_error() {
        let err = engine().rank(&[], &rust_job()).unwrap_err();
        assert!(matches!(err, RankError::EmptyBatch));
    }

    struct BrokenModel;

    impl SemanticModel for BrokenModel {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn similarity(&self, _left: &str, _right: &str) -> Option<f64> {
            Some(f64::NAN)
        }
    }

    #[test]
    fn total_failure_surfaces_nothing_processed() {
        let scoring = ScoringEngine::with_similarity(
            ScoringConfig::default(),
            SimilarityEngine::with_model(Box::new(BrokenModel)),
        );
        let engine = RankingEngine::with_scoring(scoring);

        let mut job = rust_job();
        job.description = "rust backend".into();
        let resumes = vec![extract_facts("a.txt", "rust services")];

        let err = engine.rank(&resumes, &job).unwrap_err();
        match err {
            RankError::NothingProcessed { skipped } => {
                assert_eq!(skipped.len(), 1);
                assert_eq!(skipped[0].filename, "a.txt");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn partial_failure_keeps_the_rest_of_the_batch() {
        struct FlakyModel;

        impl SemanticModel for FlakyModel {
            fn name(&self) -> &'static str {
                "flaky"
            }

            fn similarity(&self, left: &str, _right: &str) -> Option<f64> {
                if left.contains("poison") {
                    Some(f64::NAN)
                } else {
                    Some(0.5)
                }
            }
        }

        let scoring = ScoringEngine::with_similarity(
            ScoringConfig::default(),
            SimilarityEngine::with_model(Box::new(FlakyModel)),
        );
        let engine = RankingEngine::with_scoring(scoring);

        let mut job = rust_job();
        job.description = "rust backend".into();
        let resumes = vec![
            extract_facts("good.txt", "rust services"),
            extract_facts("bad.txt", "poison pill"),
        ];

        let outcome = engine.rank(&resumes, &job).unwrap();
        assert_eq!(outcome.ranked.len(), 1);
        assert_eq!(outcome.ranked[0].filename, "good.txt");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].filename, "bad.txt");
    }
}
