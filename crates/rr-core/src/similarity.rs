use std::collections::BTreeMap;

/// Optional semantic closeness capability. Implementations may come from
/// an external model; the engine treats `None` from `similarity` as
/// "no answer" and falls back to the built-in TF-IDF path.
pub trait SemanticModel: Send + Sync {
    fn name(&self) -> &'static str;
    fn similarity(&self, left: &str, right: &str) -> Option<f64>;
}

/// Outcome of resolving the optional semantic model, decided once at
/// construction rather than caught per call.
pub enum ModelInit {
    Ready(Box<dyn SemanticModel>),
    Unavailable { reason: String },
}

/// Resolve the semantic model from `RR_SEMANTIC_MODEL`. No model is
/// bundled, so any requested name resolves to `Unavailable`; unset means
/// the TF-IDF fallback was chosen deliberately.
pub fn load_model_from_env() -> ModelInit {
    match std::env::var("RR_SEMANTIC_MODEL") {
        Ok(name) if !name.trim().is_empty() => ModelInit::Unavailable {
            reason: format!("semantic model '{name}' is not bundled"),
        },
        _ => ModelInit::Unavailable {
            reason: "no semantic model requested".to_string(),
        },
    }
}

/// Computes a closeness score in [0, 1] between resume text and job
/// description. Request-local: the TF-IDF fit uses exactly the two
/// documents as its corpus, so scores are reproducible without an
/// external corpus.
pub struct SimilarityEngine {
    model: Option<Box<dyn SemanticModel>>,
}

impl SimilarityEngine {
    /// Engine with the TF-IDF fallback only.
    pub fn new() -> Self {
        Self { model: None }
    }

    /// Engine backed by an injected semantic model.
    pub fn with_model(model: Box<dyn SemanticModel>) -> Self {
        Self { model: Some(model) }
    }

    /// Resolve the optional model once and degrade silently to TF-IDF.
    pub fn from_env() -> Self {
        match load_model_from_env() {
            ModelInit::Ready(model) => {
                tracing::info!(model = model.name(), "semantic model ready");
                Self::with_model(model)
            }
            ModelInit::Unavailable { reason } => {
                tracing::debug!(%reason, "using tf-idf similarity fallback");
                Self::new()
            }
        }
    }

    /// Similarity in [0, 1]. Either side empty means no signal and scores
    /// 0.0 without touching the vectorizer; internal failure degrades to
    /// 0.0 instead of propagating.
    pub fn score(&self, resume_text: &str, job_description: &str) -> f64 {
        if resume_text.trim().is_empty() || job_description.trim().is_empty() {
            return 0.0;
        }

        if let Some(model) = &self.model {
            if let Some(score) = model.similarity(resume_text, job_description) {
                return score.clamp(0.0, 1.0);
            }
            tracing::debug!(
                model = model.name(),
                "semantic model returned no score; falling back to tf-idf"
            );
        }

        tfidf_cosine(resume_text, job_description)
    }
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

// BTreeMap keeps accumulation order deterministic, so identical inputs
// always produce bit-identical scores.
fn term_counts(tokens: &[String]) -> BTreeMap<&str, f64> {
    let mut counts: BTreeMap<&str, f64> = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Cosine similarity between TF-IDF vectors fitted over exactly the two
/// documents. Smoothed IDF (`ln((1+n)/(1+df)) + 1`) keeps shared terms
/// weighted; identical documents score 1.0.
fn tfidf_cosine(left: &str, right: &str) -> f64 {
    let left_tokens = tokenize(left);
    let right_tokens = tokenize(right);
    if left_tokens.is_empty() || right_tokens.is_empty() {
        tracing::debug!("empty vocabulary after tokenization; similarity degraded to 0.0");
        return 0.0;
    }

    let left_counts = term_counts(&left_tokens);
    let right_counts = term_counts(&right_tokens);

    let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for term in left_counts.keys() {
        *document_frequency.entry(*term).or_insert(0) += 1;
    }
    for term in right_counts.keys() {
        *document_frequency.entry(*term).or_insert(0) += 1;
    }

    let corpus_size = 2.0;
    let idf = |term: &str| -> f64 {
        let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
        ((1.0 + corpus_size) / (1.0 + df)).ln() + 1.0
    };

    let mut dot = 0.0;
    let mut left_norm = 0.0;
    let mut right_norm = 0.0;
    for (term, tf) in &left_counts {
        let weight = *tf * idf(*term);
        left_norm += weight * weight;
        if let Some(other_tf) = right_counts.get(term) {
            dot += weight * (*other_tf * idf(*term));
        }
    }
    for (term, tf) in &right_counts {
        let weight = *tf * idf(*term);
        right_norm += weight * weight;
    }

    if left_norm == 0.0 || right_norm == 0.0 {
        return 0.0;
    }

    (dot / (left_norm.sqrt() * right_norm.sqrt())).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_documents_score_one() {
        let engine = SimilarityEngine::new();
        let text = "senior rust engineer building distributed systems";
        assert!((engine.score(text, text) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_side_scores_zero() {
        let engine = SimilarityEngine::new();
        assert_eq!(engine.score("", "backend engineer"), 0.0);
        assert_eq!(engine.score("resume text", ""), 0.0);
        assert_eq!(engine.score("   ", "backend engineer"), 0.0);
    }

    #[test]
    fn disjoint_vocabularies_score_zero() {
        let engine = SimilarityEngine::new();
        assert_eq!(engine.score("rust tokio axum", "pandas numpy sklearn"), 0.0);
    }

    #[test]
    fn partial_overlap_lands_strictly_between() {
        let engine = SimilarityEngine::new();
        let score = engine.score(
            "python developer with sql experience",
            "looking for a python engineer who knows docker",
        );
        assert!(score > 0.0 && score < 1.0, "score was {score}");
    }

    #[test]
    fn punctuation_only_input_degrades_to_zero() {
        let engine = SimilarityEngine::new();
        assert_eq!(engine.score("!!! ---", "engineer"), 0.0);
    }

    struct FixedModel(f64);

    impl SemanticModel for FixedModel {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn similarity(&self, _left: &str, _right: &str) -> Option<f64> {
            Some(self.0)
        }
    }

    struct SilentModel;

    impl SemanticModel for SilentModel {
        fn name(&self) -> &'static str {
            "silent"
        }

        fn similarity(&self, _left: &str, _right: &str) -> Option<f64> {
            None
        }
    }

    #[test]
    fn injected_model_takes_precedence_and_is_clamped() {
        let engine = SimilarityEngine::with_model(Box::new(FixedModel(1.7)));
        assert_eq!(engine.score("a b", "c d"), 1.0);
    }

    #[test]
    fn model_without_answer_falls_back_to_tfidf() {
        let engine = SimilarityEngine::with_model(Box::new(SilentModel));
        let text = "rust engineer";
        assert!((engine.score(text, text) - 1.0).abs() < 1e-9);
    }
}
