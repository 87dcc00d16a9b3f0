/// Ranking weights: skill coverage dominates, free-text similarity is
/// next, stated experience rounds out the score.
pub const RANKING_WEIGHTS: Weights = Weights {
    skills: 0.40,
    similarity: 0.35,
    experience: 0.25,
};

#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub skills: f64,
    pub similarity: f64,
    pub experience: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.skills + self.similarity + self.experience
    }
}
