//! Title normalization for fuzzy header/TOC matching.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

fn punctuation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s.]").expect("valid punctuation pattern"))
}

/// Normalize a title for comparison.
///
/// Drops every character that is not a word character, whitespace or a
/// period, trims the result and applies compatibility decomposition so
/// ligatures such as `ﬁ` compare equal to `fi`.
pub fn normalize_title(title: &str) -> String {
    let cleaned = punctuation_regex().replace_all(title, "");
    cleaned.trim().nfkd().collect()
}

/// Whether a page header occurs inside a TOC title after normalization.
pub fn header_matches_title(header: &str, title: &str) -> bool {
    normalize_title(title).contains(&normalize_title(header))
}

/// Whether two titles are the same after normalization.
pub fn titles_equal(a: &str, b: &str) -> bool {
    normalize_title(a) == normalize_title(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(normalize_title("1.1 What Is an Algorithm?"), "1.1 What Is an Algorithm");
        assert_eq!(normalize_title("O-notation"), "Onotation");
        assert_eq!(normalize_title("  Proving an Algorithm’s Correctness "), "Proving an Algorithms Correctness");
    }

    #[test]
    fn test_ligatures_decompose() {
        assert_eq!(normalize_title("Efﬁciency"), "Efficiency");
        assert!(titles_equal(
            "2.2 Asymptotic Notations and Basic Efﬁciency Classes",
            "2.2 Asymptotic Notations and Basic Efficiency Classes"
        ));
    }

    #[test]
    fn test_header_substring_match() {
        assert!(header_matches_title("Exercises 2.1", "Exercises 2.1"));
        assert!(header_matches_title("What is evolution", "2.1 What is evolution"));
        assert!(!header_matches_title("Exercises 2.1", "Exercises 1.1"));
    }

    #[test]
    fn test_markdown_prefix_is_ignored() {
        assert!(titles_equal("## Informal Introduction", "Informal Introduction"));
    }
}
