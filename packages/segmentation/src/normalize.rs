//! Whitespace normalization for extracted contract text.
//!
//! Line breaks carry structure (a numbered clause starts on its own line),
//! so they survive normalization. Everything else is reduced to single spaces.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of whitespace other than line feeds.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));

/// Spaces hugging a line feed.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPACE_AROUND_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?\n ?").expect("valid regex"));

/// Three or more line feeds in a row.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Normalize raw document text.
///
/// - CRLF and lone CR become LF
/// - Tabs and runs of spaces become a single space
/// - Lines holding only whitespace become empty
/// - Three or more line breaks collapse to one blank line
/// - Leading and trailing whitespace is trimmed
///
/// The function is idempotent and never fails; empty input gives empty output.
///
/// # Examples
/// ```
/// use contract_risk_segmentation::normalize;
///
/// assert_eq!(normalize("1\tScope\r\n\r\n\r\n2  Term"), "1 Scope\n\n2 Term");
/// ```
pub fn normalize(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = HORIZONTAL_WHITESPACE.replace_all(&text, " ");
    let text = SPACE_AROUND_NEWLINE.replace_all(&text, "\n");
    let text = BLANK_LINE_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}
