//! Technology keyword extraction
//!
//! Matches a fixed vocabulary of technology terms against free text. The
//! whole vocabulary is compiled once into a single `RegexSet` rather than one
//! pattern per term, so tagging a posting is a single pass over its text.
//!
//! Matching is case-insensitive and word-boundary-delimited, but the boundary
//! guard is only applied on sides of a term whose edge character is
//! alphanumeric. Terms that start or end in punctuation ("c++", ".net",
//! "c#") would never match under a plain `\b` rule; with the one-sided guard
//! they match while "java" still refuses to match inside "javascript".

use once_cell::sync::Lazy;
use regex::RegexSet;
use std::collections::BTreeSet;

/// Technology terms extracted from posting text
pub const TECH_VOCABULARY: &[&str] = &[
    // Languages
    "java",
    "python",
    "javascript",
    "typescript",
    "c#",
    "c++",
    "go",
    "rust",
    "ruby",
    "scala",
    "kotlin",
    "swift",
    "php",
    "perl",
    "r",
    // Frameworks
    "react",
    "angular",
    "vue",
    "node.js",
    "nodejs",
    "spring",
    "django",
    "flask",
    ".net",
    "dotnet",
    "express",
    "fastapi",
    "rails",
    "nextjs",
    "next.js",
    // Cloud & DevOps
    "aws",
    "azure",
    "gcp",
    "google cloud",
    "kubernetes",
    "k8s",
    "docker",
    "terraform",
    "jenkins",
    "ci/cd",
    "ansible",
    "cloudformation",
    // Databases
    "sql",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "elasticsearch",
    "oracle",
    "dynamodb",
    "cassandra",
    "snowflake",
    "databricks",
    // Big Data & ML
    "spark",
    "hadoop",
    "kafka",
    "airflow",
    "machine learning",
    "ml",
    "ai",
    "tensorflow",
    "pytorch",
    "pandas",
    "numpy",
    "scikit-learn",
    // Financial/Trading
    "fix protocol",
    "trading",
    "risk management",
    "fintech",
    "securities",
    "order management",
    "market data",
    "algorithmic trading",
    // Other
    "api",
    "rest",
    "graphql",
    "microservices",
    "agile",
    "scrum",
    "git",
];

static VOCABULARY_MATCHER: Lazy<RegexSet> = Lazy::new(|| {
    let patterns: Vec<String> = TECH_VOCABULARY.iter().map(|t| term_pattern(t)).collect();
    RegexSet::new(&patterns).expect("vocabulary terms compile to valid patterns")
});

/// Builds the match pattern for a single vocabulary term
///
/// The term is matched literally (escaped) against lowercased text. A
/// non-alphanumeric guard is added on each side whose edge character is
/// alphanumeric; sides ending in punctuation need no guard since punctuation
/// already separates them from surrounding words.
fn term_pattern(term: &str) -> String {
    let mut pattern = String::new();

    if term
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric())
    {
        pattern.push_str("(?:^|[^a-z0-9])");
    }

    pattern.push_str(&regex::escape(term));

    if term
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric())
    {
        pattern.push_str("(?:[^a-z0-9]|$)");
    }

    pattern
}

/// Extracts the technology keywords present in the given text
///
/// Returns the sorted, deduplicated, comma-space-joined subset of
/// [`TECH_VOCABULARY`] found as whole words in the text. Deterministic and
/// total: any input (including empty text) yields a result.
///
/// # Example
///
/// ```
/// use jobhound::keywords::extract_keywords;
///
/// let found = extract_keywords("Built with Java, java and JAVA plus React.");
/// assert_eq!(found, "java, react");
/// ```
pub fn extract_keywords(text: &str) -> String {
    let lowered = text.to_lowercase();

    let found: BTreeSet<&str> = VOCABULARY_MATCHER
        .matches(&lowered)
        .iter()
        .map(|idx| TECH_VOCABULARY[idx])
        .collect();

    found.into_iter().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_dedup_and_sort() {
        let found = extract_keywords("Built with Java, java and JAVA plus React.");
        assert_eq!(found, "java, react");
    }

    #[test]
    fn test_deterministic() {
        let text = "Python and Kafka on AWS with Terraform";
        assert_eq!(extract_keywords(text), extract_keywords(text));
        assert_eq!(extract_keywords(text), "aws, kafka, python, terraform");
    }

    #[test]
    fn test_word_boundary_rejects_substrings() {
        // "javascript" must not produce "java"
        assert_eq!(extract_keywords("We love JavaScript here"), "javascript");
        // "restaurant" must not produce "rest"
        assert_eq!(extract_keywords("a restaurant menu"), "");
    }

    #[test]
    fn test_punctuation_edged_terms_match() {
        assert_eq!(extract_keywords("Modern C++ services"), "c++");
        assert_eq!(extract_keywords("CI/CD pipelines"), "ci/cd");
        assert_eq!(extract_keywords("Experience with .NET required"), ".net");
        assert_eq!(extract_keywords("C# backend work"), "c#");
    }

    #[test]
    fn test_multi_word_terms() {
        assert_eq!(
            extract_keywords("machine learning on google cloud"),
            "google cloud, machine learning"
        );
    }

    #[test]
    fn test_single_letter_term_bounded() {
        assert_eq!(extract_keywords("statistics in R required"), "r");
        // the lone 'r' in "rust" must not match as "r"
        assert_eq!(extract_keywords("rust services"), "rust");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract_keywords(""), "");
    }

    #[test]
    fn test_node_js_variants() {
        assert_eq!(extract_keywords("node.js and nodejs"), "node.js, nodejs");
    }
}
