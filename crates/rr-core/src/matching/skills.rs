use std::collections::BTreeSet;

/// Trim, lower-case and deduplicate a skill list. Exact string matching
/// only; alias or synonym resolution is deliberately out of scope.
pub fn normalize_skill_set(skills: &[String]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatch {
    pub score: f64,
    pub matched: BTreeSet<String>,
    pub missing: BTreeSet<String>,
}

/// Fraction of required skills present in the possessed set, with the
/// matched/missing breakdown. Both extremes are exact: no required
/// skills or no possessed skills scores 0.0 (an empty skill set earns
/// nothing), full coverage scores 1.0.
pub fn match_skills(required: &[String], possessed: &BTreeSet<String>) -> SkillMatch {
    let required_set = normalize_skill_set(required);
    if required_set.is_empty() {
        return SkillMatch {
            score: 0.0,
            matched: BTreeSet::new(),
            missing: BTreeSet::new(),
        };
    }

    let possessed_set: BTreeSet<String> = possessed
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .collect();
    if possessed_set.is_empty() {
        return SkillMatch {
            score: 0.0,
            matched: BTreeSet::new(),
            missing: required_set,
        };
    }

    let matched: BTreeSet<String> = required_set.intersection(&possessed_set).cloned().collect();
    let missing: BTreeSet<String> = required_set.difference(&possessed_set).cloned().collect();
    let score = matched.len() as f64 / required_set.len() as f64;

    SkillMatch {
        score,
        matched,
        missing,
    }
}
