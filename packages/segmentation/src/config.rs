//! Defaults and tuning options for clause segmentation.

use serde::{Deserialize, Serialize};

/// Clauses shorter than this many characters are merged into a neighbour.
pub const DEFAULT_MIN_CHARS: usize = 30;

/// Number of sentences per clause when falling back to sentence chunking.
pub const DEFAULT_SENTENCE_GROUP_SIZE: usize = 2;

/// Tuning options for [`crate::segment_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    /// Minimum clause length in characters before it is merged away.
    pub min_chars: usize,

    /// Sentences per window in the fallback chunker. Zero is treated as one.
    pub sentence_group_size: usize,
}

impl SegmentOptions {
    /// Create options with the default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum clause length.
    #[must_use]
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Set the fallback sentence window size.
    #[must_use]
    pub fn with_sentence_group_size(mut self, size: usize) -> Self {
        self.sentence_group_size = size;
        self
    }
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_CHARS,
            sentence_group_size: DEFAULT_SENTENCE_GROUP_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SegmentOptions::default();
        assert_eq!(options.min_chars, 30);
        assert_eq!(options.sentence_group_size, 2);
    }

    #[test]
    fn test_options_builder() {
        let options = SegmentOptions::new()
            .with_min_chars(10)
            .with_sentence_group_size(3);
        assert_eq!(options.min_chars, 10);
        assert_eq!(options.sentence_group_size, 3);
    }

    #[test]
    fn test_options_deserialize_partial() {
        let options: SegmentOptions = serde_json::from_str(r#"{"min_chars": 12}"#).unwrap();
        assert_eq!(options.min_chars, 12);
        assert_eq!(options.sentence_group_size, DEFAULT_SENTENCE_GROUP_SIZE);
    }
}
