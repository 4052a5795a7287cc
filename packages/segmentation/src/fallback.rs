//! Sentence-window chunking for text without structural markers.

use regex::Regex;
use std::sync::LazyLock;

/// Terminal punctuation followed by the whitespace that separates sentences.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

/// Split text into trimmed, non-empty sentences.
///
/// A boundary sits right after `.`, `!` or `?` when whitespace follows. The
/// punctuation stays with its sentence; the whitespace is dropped.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // Punctuation is a single ASCII byte
        sentences.push(&text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Chunk text into windows of `group_size` consecutive sentences.
///
/// Text without any sentence content comes back as a single trimmed chunk,
/// or as nothing when it is empty. The last window may be shorter than
/// `group_size`. A `group_size` of zero is treated as one.
///
/// # Examples
/// ```
/// use contract_risk_segmentation::chunk;
///
/// let text = "First sentence. Second one! Third? Fourth.";
/// assert_eq!(chunk(text, 2), vec!["First sentence. Second one!", "Third? Fourth."]);
/// ```
pub fn chunk(text: &str, group_size: usize) -> Vec<String> {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        let trimmed = text.trim();
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        };
    }

    sentences
        .chunks(group_size.max(1))
        .map(|window| window.join(" "))
        .collect()
}
