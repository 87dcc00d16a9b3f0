use std::collections::BTreeSet;

/// Improvement suggestions from a score breakdown. A fixed rule table
/// evaluated in order; each rule is independent and several may fire.
/// Output order always follows the table, and a resume that trips no
/// rule gets a single positive message.
pub fn suggest(
    skill_score: f64,
    similarity_score: f64,
    experience_score: f64,
    missing_skills: &BTreeSet<String>,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if skill_score < 0.3 {
        suggestions.push(
            "Critical skill gap: most required skills are missing. \
             Consider learning the key technologies."
                .to_string(),
        );
    } else if skill_score < 0.6 {
        suggestions.push(
            "Skill enhancement: focus on learning the missing skills to improve your match."
                .to_string(),
        );
    }

    if similarity_score < 0.2 {
        suggestions.push(
            "Resume content: your resume does not align well with the job description. \
             Use more relevant keywords."
                .to_string(),
        );
    } else if similarity_score < 0.4 {
        suggestions.push(
            "Content optimization: tailor your resume to better match the job requirements."
                .to_string(),
        );
    }

    if experience_score < 0.5 {
        suggestions.push(
            "Experience gap: highlight relevant projects or internships to bridge the \
             experience gap."
                .to_string(),
        );
    }

    if !missing_skills.is_empty() {
        let priority: Vec<&str> = missing_skills
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        suggestions.push(format!(
            "Priority learning: focus on these skills: {}",
            priority.join(", ")
        ));
    }

    if suggestions.is_empty() {
        suggestions.push("Excellent match: your resume aligns well with this position.".to_string());
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(skills: &[&str]) -> BTreeSet<String> {
        skills.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn strong_scores_produce_the_positive_message() {
        let suggestions = suggest(0.9, 0.8, 1.0, &BTreeSet::new());
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].starts_with("Excellent match"));
    }

    #[test]
    fn weak_scores_fire_in_table_order() {
        let suggestions = suggest(0.1, 0.1, 0.2, &set(&["sql"]));

        assert_eq!(suggestions.len(), 4);
        assert!(suggestions[0].starts_with("Critical skill gap"));
        assert!(suggestions[1].starts_with("Resume content"));
        assert!(suggestions[2].starts_with("Experience gap"));
        assert!(suggestions[3].starts_with("Priority learning"));
    }

    #[test]
    fn mid_band_scores_use_the_softer_messages() {
        let suggestions = suggest(0.4, 0.3, 1.0, &BTreeSet::new());

        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].starts_with("Skill enhancement"));
        assert!(suggestions[1].starts_with("Content optimization"));
    }

    #[test]
    fn zero_experience_against_a_requirement_flags_the_gap() {
        let suggestions = suggest(1.0, 0.9, 0.0, &BTreeSet::new());
        assert!(suggestions.iter().any(|s| s.starts_with("Experience gap")));
    }

    #[test]
    fn priority_learning_lists_at_most_three_skills_in_set_order() {
        let suggestions = suggest(
            1.0,
            0.9,
            1.0,
            &set(&["terraform", "aws", "kubernetes", "docker"]),
        );

        let priority = suggestions
            .iter()
            .find(|s| s.starts_with("Priority learning"))
            .expect("priority rule should fire");
        // BTreeSet iterates in sorted order; only the first three appear.
        assert!(priority.ends_with("aws, docker, kubernetes"));
        assert!(!priority.contains("terraform"));
    }
}
