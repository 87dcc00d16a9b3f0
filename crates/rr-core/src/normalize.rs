use once_cell::sync::Lazy;
use regex::Regex;

// Keeps . + # - so tokens like "c++", "c#" and "node.js" survive cleaning.
static RE_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s.+#-]").unwrap());

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Clean raw extracted text before similarity and keyword analysis:
/// noise characters become spaces, whitespace runs collapse to a single
/// space, and the result is trimmed. Empty input yields an empty string.
pub fn normalize_text(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let cleaned = RE_NOISE.replace_all(text, " ");
    let collapsed = RE_WHITESPACE.replace_all(&cleaned, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(
            normalize_text("senior  engineer\n\t 5 years"),
            "senior engineer 5 years"
        );
    }

    #[test]
    fn keeps_skill_punctuation() {
        assert_eq!(
            normalize_text("C++, C# & node.js (expert)"),
            "C++ C# node.js expert"
        );
    }

    #[test]
    fn empty_and_blank_input_yield_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   \n\t "), "");
    }
}
