//! # Plagscan Similarity
//!
//! Multi-level similarity between two documents. Each level looks at the pair
//! from a different angle and returns a score in `[0, 1]`:
//!
//! 1.  **Character**: Jaccard over lower-cased character sets of the raw text.
//! 2.  **Word**: cosine over term frequencies of the normalized text.
//! 3.  **Semantic**: mean pairwise word similarity (exact, stem, synonym or
//!     edit distance) over meaningful tokens.
//! 4.  **Structural**: sentence count and mean sentence length.
//! 5.  **Entity-filtered**: word level after deleting every recognized entity
//!     mention, so renaming people and places does not hide copied prose.
//! 6.  **Content quality**: share of meaningful tokens on both sides.
//!
//! [`SimilarityAnalyzer`] composes them into one weighted score, compressing
//! the word and semantic levels with [`diminishing_returns`] and penalizing
//! low-content pairs.
//!
//! ## Contract
//!
//! - Every function here is pure: no I/O, no clocks, no global state beyond
//!   the immutable shared lexicon.
//! - All metrics are symmetric under argument swap. The semantic level is
//!   symmetric up to floating point summation order.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use canonical::{Lexicon, NormalizeConfig, Normalizer};
//! use similarity::{SimilarityAnalyzer, SimilarityConfig};
//!
//! let lexicon = Arc::new(Lexicon::builtin().unwrap());
//! let normalizer = Normalizer::new(lexicon, NormalizeConfig::default()).unwrap();
//! let analyzer = SimilarityAnalyzer::new(normalizer, SimilarityConfig::default()).unwrap();
//!
//! let text = "Model klasifikasi teks dilatih memakai korpus berita.";
//! let analysis = analyzer.analyze(text, text);
//!
//! assert_eq!(analysis.word_level, 1.0);
//! assert!(analysis.final_score <= 1.0);
//! ```
pub mod compose;
pub mod config;
pub mod edit;
pub mod metrics;
pub mod ngram;

pub use crate::compose::{
    content_quality, content_ratio, diminishing_returns, is_low_content, PreparedText,
    SimilarityAnalysis, SimilarityAnalyzer,
};
pub use crate::config::{ScoreWeights, SimilarityConfig, SimilarityError};
pub use crate::edit::{
    edit_similarity, levenshtein, simple_stem, word_similarity, STEM_MATCH_SCORE, SYNONYM_SCORE,
};
pub use crate::metrics::{
    character_level, entity_filtered, semantic_level, structural_level, word_level,
};
pub use crate::ngram::{ngram_similarity, smart_ngrams};

/// Human-readable identifier of the scoring algorithm.
pub const SIMILARITY_ALGORITHM: &str = "Advanced Multi-Level Analysis v3.1";
