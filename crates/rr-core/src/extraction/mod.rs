use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::normalize::normalize_text;
use crate::{Contact, ResumeFacts};

/// Curated skill vocabulary. Multi-word terms allowed; matching is a
/// case-insensitive substring test over the full text, so "java" also
/// fires inside "javascript" (known false-positive source, kept as a
/// documented limitation).
const SKILL_VOCABULARY: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "typescript", "c++", "c#", "php", "ruby", "go", "rust",
    "swift", "kotlin", "scala", "r", "matlab", "perl", "shell", "bash",
    // Web technologies
    "html", "css", "react", "angular", "vue.js", "node.js", "express", "django", "flask",
    "spring", "laravel", "rails", "asp.net", "jquery", "bootstrap", "sass", "less",
    // Databases
    "sql", "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "oracle", "sqlite",
    "cassandra", "dynamodb", "neo4j",
    // Cloud and devops
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "git", "github", "gitlab",
    "terraform", "ansible", "chef", "puppet", "vagrant", "linux", "unix",
    // Data science and ML
    "machine learning", "deep learning", "tensorflow", "pytorch", "scikit-learn", "pandas",
    "numpy", "matplotlib", "seaborn", "jupyter", "tableau", "power bi", "spark", "hadoop",
    "kafka", "airflow", "mlflow",
    // Mobile
    "android", "ios", "react native", "flutter", "xamarin", "ionic",
    // Practices and other
    "microservices", "rest api", "graphql", "websockets", "oauth", "jwt", "agile", "scrum",
    "ci/cd", "tdd", "bdd", "design patterns", "algorithms", "data structures",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor", "master", "phd", "doctorate", "diploma", "certificate",
    "b.tech", "m.tech", "b.sc", "m.sc", "mba", "bba", "be", "me",
    "computer science", "engineering", "information technology", "software",
];

lazy_static! {
    // Phrasings for stated experience: "5 years experience" / "3+ years in"
    // / "experience of 8 years" / "4 yrs experience" / "2 year experience".
    // All patterns run against lower-cased text.
    static ref EXPERIENCE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(\d+)\+?\s*years?\s*(?:of\s*)?experience").unwrap(),
        Regex::new(r"(\d+)\+?\s*years?\s*in").unwrap(),
        Regex::new(r"experience\s*(?:of\s*)?(\d+)\+?\s*years?").unwrap(),
        Regex::new(r"(\d+)\+?\s*yrs?\s*(?:of\s*)?experience").unwrap(),
        Regex::new(r"(\d+)\+?\s*year\s*experience").unwrap(),
    ];

    static ref EMAIL_RE: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();

    // Permissive by design: any 7-15 digit run with optional leading "+"
    // counts as a phone, so years or zip sequences can be captured too.
    static ref PHONE_RE: Regex = Regex::new(r"\+?[0-9]{7,15}").unwrap();
}

/// Derive `ResumeFacts` from raw extracted text. Never fails: empty or
/// unparseable input produces empty collections and zero years.
pub fn extract_facts(filename: &str, raw_text: &str) -> ResumeFacts {
    let lowered = raw_text.to_lowercase();

    ResumeFacts {
        filename: filename.to_string(),
        normalized_text: normalize_text(raw_text),
        skills: find_vocabulary_terms(&lowered, SKILL_VOCABULARY),
        experience_years: extract_experience_years(&lowered),
        education: find_vocabulary_terms(&lowered, EDUCATION_KEYWORDS),
        contact: extract_contact(raw_text),
    }
}

/// Vocabulary terms present as substrings of the lower-cased text.
fn find_vocabulary_terms(lowered_text: &str, vocabulary: &[&str]) -> BTreeSet<String> {
    vocabulary
        .iter()
        .filter(|term| lowered_text.contains(*term))
        .map(|term| term.to_string())
        .collect()
}

/// Maximum stated experience across all patterns; resumes phrase
/// experience in several ways and the strongest claim wins
/// ("5 years in backend, 8+ years overall" reads as 8).
pub fn extract_experience_years(lowered_text: &str) -> u32 {
    EXPERIENCE_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.captures_iter(lowered_text))
        .filter_map(|captures| captures.get(1))
        .filter_map(|digits| digits.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// First email-shaped and first phone-shaped match, if any.
pub fn extract_contact(text: &str) -> Contact {
    Contact {
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE_RE.find(text).map(|m| m.as_str().to_string()),
    }
}
