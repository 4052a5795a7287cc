//! Segmentation orchestrator.
//!
//! Runs the normalizer, splits lines, and then takes exactly one of two
//! paths before merging fragments:
//!
//! ```text
//! normalize ─▶ split lines ─┬─▶ group by markers ──┬─▶ merge tiny ─▶ clauses
//!                           └─▶ sentence windows ──┘
//! ```
//!
//! The sentence path is taken when no line carries a clause marker, or when
//! grouping by markers produced at most one clause.

use serde::{Deserialize, Serialize};

use crate::config::{SegmentOptions, DEFAULT_SENTENCE_GROUP_SIZE};
use crate::fallback::chunk;
use crate::grouping::group;
use crate::merge::merge_tiny;
use crate::normalize::normalize;
use crate::structure::count_clause_starts;

/// Which path produced the clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentationPath {
    /// Nothing left after normalization.
    Empty,
    /// Clauses were grouped by numbered/lettered markers.
    Structural,
    /// Clauses were built from sentence windows.
    Fallback,
}

impl SegmentationPath {
    /// Lowercase name of the path, as serialized.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Structural => "structural",
            Self::Fallback => "fallback",
        }
    }
}

/// Result of segmenting one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segmentation {
    /// Path taken through the pipeline.
    pub path: SegmentationPath,

    /// Number of lines recognised as clause starts.
    pub clause_starts: usize,

    /// Final clauses in document order.
    pub clauses: Vec<String>,
}

impl Segmentation {
    fn empty() -> Self {
        Self {
            path: SegmentationPath::Empty,
            clause_starts: 0,
            clauses: Vec::new(),
        }
    }
}

/// Split contract text into clauses, merging fragments below `min_chars`.
///
/// # Examples
/// ```
/// use contract_risk_segmentation::segment_clauses;
///
/// assert!(segment_clauses("", 30).is_empty());
///
/// let text = "1 Scope.\n2 Confidentiality obligations are strict and survive termination.";
/// assert_eq!(segment_clauses(text, 25).len(), 1);
/// ```
pub fn segment_clauses(text: &str, min_chars: usize) -> Vec<String> {
    let options = SegmentOptions {
        min_chars,
        sentence_group_size: DEFAULT_SENTENCE_GROUP_SIZE,
    };
    segment_document(text, &options).clauses
}

/// Split contract text into clauses and report how they were found.
pub fn segment_document(text: &str, options: &SegmentOptions) -> Segmentation {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return Segmentation::empty();
    }

    let lines: Vec<&str> = normalized
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let clause_starts = count_clause_starts(&lines);
    let grouped = group(&lines);

    let (path, candidates) = if clause_starts == 0 || grouped.len() <= 1 {
        (
            SegmentationPath::Fallback,
            chunk(&normalized, options.sentence_group_size),
        )
    } else {
        (SegmentationPath::Structural, grouped)
    };

    let clauses = merge_tiny(&candidates, options.min_chars);

    tracing::debug!(
        path = ?path,
        lines = lines.len(),
        clause_starts,
        candidates = candidates.len(),
        clauses = clauses.len(),
        "Segmented document"
    );

    Segmentation {
        path,
        clause_starts,
        clauses,
    }
}
