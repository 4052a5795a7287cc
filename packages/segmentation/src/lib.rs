//! Contract Risk Segmentation - Split contract text into clause-sized units.
//!
//! This crate turns the raw text extracted from a contract into an ordered
//! list of clauses that downstream classification can work on. It handles
//! numbered clauses ("1", "1.2", "3.4.5"), lettered sub-items ("(a)") and
//! unstructured prose, and is deterministic for a given input.
//!
//! # Example
//!
//! ```
//! use contract_risk_segmentation::segment_clauses;
//!
//! let text = "1 Confidentiality Each party shall keep data confidential.\n\
//!             2 Termination Either party may terminate with notice.";
//! let clauses = segment_clauses(text, 30);
//! assert_eq!(clauses.len(), 2);
//! assert!(clauses[0].starts_with("1 Confidentiality"));
//! ```
//!
//! # Architecture
//!
//! The pipeline runs leaf-first through these modules:
//!
//! - [`normalize`]: Line-ending and whitespace normalization
//! - [`structure`]: Detection of numbered/lettered clause starts
//! - [`grouping`]: Grouping of lines into clause candidates
//! - [`fallback`]: Sentence-window chunking for unstructured text
//! - [`merge`]: Merging of tiny fragments into their neighbours
//! - [`segment`]: The orchestrator choosing between the structural and fallback paths
//! - [`config`]: Defaults and tuning options

pub mod config;
pub mod fallback;
pub mod grouping;
pub mod merge;
pub mod normalize;
pub mod segment;
pub mod structure;

pub use config::{SegmentOptions, DEFAULT_MIN_CHARS, DEFAULT_SENTENCE_GROUP_SIZE};
pub use fallback::chunk;
pub use grouping::group;
pub use merge::merge_tiny;
pub use normalize::normalize;
pub use segment::{segment_clauses, segment_document, Segmentation, SegmentationPath};
pub use structure::is_clause_start;
