use canonical::CanonicalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for [`ExcerptMatcher`](crate::ExcerptMatcher).
///
/// `MatcherConfig` is cheap to clone and serde-friendly so it can be embedded
/// in higher-level configs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatcherConfig {
    /// Configuration schema version. Version 0 is reserved.
    pub version: u32,
    /// A sentence must be strictly longer than this many characters.
    pub min_sentence_chars: usize,
    /// Minimum number of content tokens in a candidate sentence.
    pub min_meaningful_tokens: usize,
    /// Minimum share of content tokens in a candidate sentence.
    pub min_meaningful_ratio: f64,
    /// Enhanced similarity must exceed this for a pair to be kept.
    pub similarity_threshold: f64,
    /// Above this, a pair is kept even without distinctive token overlap.
    pub strong_similarity: f64,
    /// Distinctive tokens two sentences must share below `strong_similarity`.
    pub min_distinctive_overlap: usize,
    /// Multiplier applied when both sentences use the same academic phrasing.
    pub academic_penalty: f64,
    /// Maximum excerpts returned.
    pub max_excerpts: usize,
    /// Common phrases kept per excerpt.
    pub phrases_per_excerpt: usize,
    /// Displayed sentences are cut to this many characters plus `...`.
    pub display_chars: usize,
    /// Shard target sentences across the rayon pool.
    pub use_parallel: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            version: 1,
            min_sentence_chars: 50,
            min_meaningful_tokens: 3,
            min_meaningful_ratio: 0.3,
            similarity_threshold: 0.7,
            strong_similarity: 0.85,
            min_distinctive_overlap: 2,
            academic_penalty: 0.7,
            max_excerpts: 8,
            phrases_per_excerpt: 5,
            display_chars: 150,
            use_parallel: false,
        }
    }
}

impl MatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(mut self, similarity: f64, strong: f64) -> Self {
        self.similarity_threshold = similarity;
        self.strong_similarity = strong;
        self
    }

    pub fn with_min_sentence_chars(mut self, chars: usize) -> Self {
        self.min_sentence_chars = chars;
        self
    }

    pub fn with_max_excerpts(mut self, max: usize) -> Self {
        self.max_excerpts = max;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.version == 0 {
            return Err(MatchError::InvalidConfig(
                "version must be >= 1".into(),
            ));
        }
        for (name, value) in [
            ("min_meaningful_ratio", self.min_meaningful_ratio),
            ("similarity_threshold", self.similarity_threshold),
            ("strong_similarity", self.strong_similarity),
            ("academic_penalty", self.academic_penalty),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MatchError::InvalidConfig(format!(
                    "{name} must be between 0.0 and 1.0 (got {value})"
                )));
            }
        }
        if self.max_excerpts == 0 {
            return Err(MatchError::InvalidConfig(
                "max_excerpts must be greater than zero".into(),
            ));
        }
        if self.display_chars == 0 {
            return Err(MatchError::InvalidConfig(
                "display_chars must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// A pair of similar sentences, one from each document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExcerptMatch {
    /// Target sentence, cut for display.
    pub target_sentence: String,
    /// Source sentence, cut for display.
    pub source_sentence: String,
    /// Enhanced similarity as a rounded percentage.
    pub similarity_percent: u32,
    /// Longest shared phrases, longest first.
    pub common_phrases: Vec<String>,
    /// Position of the target sentence among filtered target sentences.
    pub target_index: usize,
    /// Position of the source sentence among filtered source sentences.
    pub source_index: usize,
    pub significance_score: f64,
}

impl ExcerptMatch {
    /// Ranking key: significance times similarity percent.
    pub fn rank(&self) -> f64 {
        self.significance_score * f64::from(self.similarity_percent)
    }
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Invalid matcher configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// Building the sentence normalizer failed.
    #[error(transparent)]
    Canonical(#[from] CanonicalError),
}
