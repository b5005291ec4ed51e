//! # Plagscan Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` finds the sentences of a target document that closely resemble
//! sentences of a source document, so a report can show *where* two texts
//! overlap rather than only *how much*.
//!
//! ## Pipeline
//!
//! 1.  **Candidate sentences**: both texts are split on `.`, `!` and `?`.
//!     Sentences shorter than 51 characters, or with fewer than three
//!     meaningful words (or under 30% of them), are dropped.
//! 2.  **Pair scoring**: every target/source pair is scored with the
//!     semantic-level similarity of their normalized forms. Pairs that share
//!     stock academic phrasing ("dapat disimpulkan bahwa", "based on ...
//!     results") are penalized by 30%.
//! 3.  **Significance**: a pair is kept above 0.7 when it also shares at
//!     least two distinctive words, or above 0.85 on its own.
//! 4.  **Ranking**: kept pairs are ordered by significance times similarity
//!     and the top eight are returned, each with up to five shared phrases.
//!
//! ## Core Types
//!
//! - [`MatcherConfig`]: thresholds, caps and the parallelism toggle.
//! - [`ExcerptMatcher`]: runs the pipeline above.
//! - [`ExcerptMatch`]: one ranked sentence pair.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use canonical::{Lexicon, NormalizeConfig, Normalizer};
//! use matcher::{ExcerptMatcher, MatcherConfig};
//!
//! let lexicon = Arc::new(Lexicon::builtin().unwrap());
//! let normalizer = Normalizer::new(lexicon, NormalizeConfig::default()).unwrap();
//! let matcher = ExcerptMatcher::new(normalizer, MatcherConfig::default()).unwrap();
//!
//! let excerpts = matcher.find_similar_excerpts("Kalimat pendek.", "Kalimat lain.");
//! assert!(excerpts.is_empty());
//! ```

pub mod engine;
pub mod phrases;
pub mod types;

pub use crate::engine::{
    enhanced_similarity, penalized_similarity, shares_academic_phrasing, ExcerptMatcher,
    MAX_COMMON_PHRASES,
};
pub use crate::phrases::{
    distinctive_overlap, distinctive_tokens, extract_common_phrases, has_meaningful_content,
    significance_score, truncate_for_display,
};
pub use crate::types::{ExcerptMatch, MatchError, MatcherConfig};
