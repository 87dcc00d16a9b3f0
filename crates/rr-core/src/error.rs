use thiserror::Error;

use crate::SkippedResume;

/// Failures surfaced by the ranking boundary. Per-resume problems are
/// downgraded to `SkippedResume` diagnostics; only whole-batch failure
/// modes reach the caller as errors.
#[derive(Debug, Error)]
pub enum RankError {
    #[error("empty batch: no resumes were supplied")]
    EmptyBatch,
    #[error("no resumes could be processed ({} skipped)", skipped.len())]
    NothingProcessed { skipped: Vec<SkippedResume> },
    #[error("failed to write ranking report: {0}")]
    Report(#[from] csv::Error),
}
