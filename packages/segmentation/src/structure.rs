//! Structural line classification.
//!
//! A clause start is a line whose first token is a numbering marker such as
//! `1`, `1.2`, `3.4.5` or a lettered item such as `(a)`, followed by whitespace.

use regex::Regex;
use std::sync::LazyLock;

/// Numbered (`1`, `1.2`) or lettered (`(a)`) marker at the start of a line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CLAUSE_START_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:\d+(?:\.\d+)*\s+|\([a-z]\)\s+)").expect("valid regex")
});

/// Check whether a line opens a new numbered or lettered clause.
///
/// # Examples
/// ```
/// use contract_risk_segmentation::is_clause_start;
///
/// assert!(is_clause_start("1.2 Payment terms"));
/// assert!(is_clause_start("(b) Late fees apply."));
/// assert!(!is_clause_start("Payment is due within 30 days."));
/// ```
#[must_use]
pub fn is_clause_start(line: &str) -> bool {
    CLAUSE_START_PATTERN.is_match(line)
}

/// Count the lines in `lines` that open a clause.
pub(crate) fn count_clause_starts<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .filter(|line| is_clause_start(line.as_ref()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_markers() {
        assert!(is_clause_start("1 Confidentiality"));
        assert!(is_clause_start("12 Notices"));
        assert!(is_clause_start("1.2 Payment"));
        assert!(is_clause_start("3.4.5 Audit rights"));
    }

    #[test]
    fn test_lettered_markers() {
        assert!(is_clause_start("(a) Payment due in 15 days."));
        assert!(is_clause_start("(z) Last item"));
    }

    #[test]
    fn test_lettered_markers_case_insensitive() {
        assert!(is_clause_start("(A) Payment due in 15 days."));
        assert!(is_clause_start("(C) Taxes extra."));
    }

    #[test]
    fn test_leading_whitespace_allowed() {
        assert!(is_clause_start("   2 Termination"));
        assert!(is_clause_start("\t(b) Late fee applies."));
    }

    #[test]
    fn test_marker_only_line_with_trailing_whitespace() {
        assert!(is_clause_start("1 "));
        assert!(is_clause_start("(a) "));
    }

    #[test]
    fn test_marker_without_whitespace_is_not_a_start() {
        assert!(!is_clause_start("1"));
        assert!(!is_clause_start("(a)"));
        assert!(!is_clause_start("1.2Payment"));
        assert!(!is_clause_start("(a)Payment"));
    }

    #[test]
    fn test_trailing_dot_marker_is_not_a_start() {
        // Each dot must be followed by another digit group
        assert!(!is_clause_start("1. Scope"));
    }

    #[test]
    fn test_embedded_numbers_do_not_match() {
        assert!(!is_clause_start("Payment is due within 30 days."));
        assert!(!is_clause_start("See clause 4.2 for details."));
        assert!(!is_clause_start("Item (a) applies."));
    }

    #[test]
    fn test_multi_letter_parenthetical_is_not_a_start() {
        assert!(!is_clause_start("(iv) Fourth item"));
        assert!(!is_clause_start("(1) Numbered in parentheses"));
    }

    #[test]
    fn test_count_clause_starts() {
        let lines = ["1 Scope", "continued text", "(a) item", "2 Term"];
        assert_eq!(count_clause_starts(&lines), 3);
        assert_eq!(count_clause_starts::<&str>(&[]), 0);
    }
}
