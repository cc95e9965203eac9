//! Answer normalization and matching.
//!
//! Both the typed answer and every accepted form go through the same
//! normalization: trim, collapse whitespace runs to one space, lowercase.
//! Lowercasing only affects Latin text; Hangul has no case.

/// Normalizes text for comparison.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Returns true if `answer` equals any one of the accepted forms after normalization.
pub fn matches_any<S: AsRef<str>>(answer: &str, accepted: &[S]) -> bool {
    let answer = normalize(answer);
    accepted
        .iter()
        .any(|form| normalize(form.as_ref()) == answer)
}

/// Input the UI should not submit at all.
pub fn is_blank_answer(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_collapses() {
        assert_eq!(normalize("  be   in\tcharge  of "), "be in charge of");
    }

    #[test]
    fn test_normalize_case_folds_latin_only() {
        assert_eq!(normalize("Shoot"), "shoot");
        assert_eq!(normalize("비행기"), "비행기");
    }

    #[test]
    fn test_matches_any_ignores_case_and_spacing() {
        assert!(matches_any("  Shoot ", &["shoot"]));
        assert!(matches_any("WORK  OUT", &["work out"]));
        assert!(!matches_any("shot", &["shoot"]));
    }

    #[test]
    fn test_matches_any_accepts_synonyms() {
        let forms = vec!["기술".to_string(), "기량".to_string()];
        assert!(matches_any("기술", &forms));
        assert!(matches_any(" 기량 ", &forms));
        assert!(!matches_any("기능", &forms));
    }

    #[test]
    fn test_empty_answer_never_matches() {
        assert!(!matches_any("", &["airplane"]));
        assert!(!matches_any("   ", &["airplane"]));
    }

    #[test]
    fn test_is_blank_answer() {
        assert!(is_blank_answer(""));
        assert!(is_blank_answer(" \t "));
        assert!(!is_blank_answer(" a "));
    }
}
