//! Merging of tiny clause fragments.

/// Merge chunks shorter than `min_chars` characters into their neighbours.
///
/// Chunks are trimmed and empty ones dropped. A short chunk is appended to
/// the previous output element. The first chunk has no predecessor, so if it
/// is still short after the forward pass it is prepended to the second one.
/// Order is strictly document order; sizes never reorder anything.
///
/// # Examples
/// ```
/// use contract_risk_segmentation::merge_tiny;
///
/// let chunks = ["1 Scope.", "2 Confidentiality obligations are strict.", "(a) Also."];
/// assert_eq!(
///     merge_tiny(&chunks, 25),
///     vec!["1 Scope. 2 Confidentiality obligations are strict. (a) Also."]
/// );
/// ```
pub fn merge_tiny<S: AsRef<str>>(chunks: &[S], min_chars: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();

    for chunk in chunks {
        let current = chunk.as_ref().trim();
        if current.is_empty() {
            continue;
        }

        match merged.last_mut() {
            Some(last) if is_tiny(current, min_chars) => {
                last.push(' ');
                last.push_str(current);
            }
            _ => merged.push(current.to_string()),
        }
    }

    if merged.len() > 1 && is_tiny(&merged[0], min_chars) {
        let first = merged.remove(0);
        merged[0] = format!("{first} {}", merged[0]);
    }

    merged
}

fn is_tiny(text: &str, min_chars: usize) -> bool {
    text.chars().count() < min_chars
}
