//! Configuration and error types for similarity scoring.
//!
//! Everything here is free of I/O so that scoring stays a pure function of
//! `(target, source, lexicon, config)`.

use canonical::CanonicalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Weights of the six signals in the final score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoreWeights {
    pub character: f64,
    pub word: f64,
    pub semantic: f64,
    pub structural: f64,
    pub entity_filtered: f64,
    pub content_quality: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            character: 0.05,
            word: 0.25,
            semantic: 0.45,
            structural: 0.15,
            entity_filtered: 0.05,
            content_quality: 0.05,
        }
    }
}

impl ScoreWeights {
    pub const SUM_TOLERANCE: f64 = 1e-6;

    pub fn sum(&self) -> f64 {
        self.character
            + self.word
            + self.semantic
            + self.structural
            + self.entity_filtered
            + self.content_quality
    }

    pub fn validate(&self) -> Result<(), SimilarityError> {
        let all = [
            self.character,
            self.word,
            self.semantic,
            self.structural,
            self.entity_filtered,
            self.content_quality,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(SimilarityError::InvalidWeights(
                "weights must be finite and non-negative".into(),
            ));
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(SimilarityError::InvalidWeights(format!(
                "weights must sum to 1.0 (got {sum})"
            )));
        }
        Ok(())
    }
}

/// Configuration for [`SimilarityAnalyzer`](crate::SimilarityAnalyzer).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Scoring behavior version. Bump on any change that moves scores.
    pub version: u32,
    /// Tokens per smart n-gram.
    pub ngram_size: usize,
    pub weights: ScoreWeights,
    /// A text with fewer content tokens than this is low content.
    pub low_content_min_tokens: usize,
    /// A text whose content-token ratio is below this is low content.
    pub low_content_min_ratio: f64,
    /// Multiplier applied to the score when either text is low content.
    pub low_content_penalty: f64,
    /// Shard the semantic cross product across the rayon pool.
    pub use_parallel: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            version: 1,
            ngram_size: 3,
            weights: ScoreWeights::default(),
            low_content_min_tokens: 10,
            low_content_min_ratio: 0.3,
            low_content_penalty: 0.7,
            use_parallel: false,
        }
    }
}

impl SimilarityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ngram_size(mut self, n: usize) -> Self {
        self.ngram_size = n;
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_low_content(mut self, min_tokens: usize, min_ratio: f64, penalty: f64) -> Self {
        self.low_content_min_tokens = min_tokens;
        self.low_content_min_ratio = min_ratio;
        self.low_content_penalty = penalty;
        self
    }

    /// Enable or disable parallel semantic scoring. Results are identical
    /// either way.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn validate(&self) -> Result<(), SimilarityError> {
        if self.version < 1 {
            return Err(SimilarityError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.ngram_size < 1 {
            return Err(SimilarityError::InvalidNgramSize { n: self.ngram_size });
        }
        if !(0.0..=1.0).contains(&self.low_content_min_ratio) {
            return Err(SimilarityError::InvalidLowContent(format!(
                "min ratio must be within [0, 1] (got {})",
                self.low_content_min_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.low_content_penalty) {
            return Err(SimilarityError::InvalidLowContent(format!(
                "penalty must be within [0, 1] (got {})",
                self.low_content_penalty
            )));
        }
        self.weights.validate()
    }
}

/// Errors returned when building a similarity analyzer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimilarityError {
    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid config: ngram_size must be >= 1 (got {n})")]
    InvalidNgramSize { n: usize },

    #[error("invalid score weights: {0}")]
    InvalidWeights(String),

    #[error("invalid low-content policy: {0}")]
    InvalidLowContent(String),

    #[error(transparent)]
    Normalize(#[from] CanonicalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = SimilarityConfig::default();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.ngram_size, 3);
        assert_eq!(cfg.low_content_min_tokens, 10);
        assert!(!cfg.use_parallel);
        assert!(cfg.validate().is_ok());
        assert!((cfg.weights.sum() - 1.0).abs() < ScoreWeights::SUM_TOLERANCE);
    }

    #[test]
    fn builder_methods() {
        let cfg = SimilarityConfig::new()
            .with_ngram_size(4)
            .with_parallel(true)
            .with_low_content(5, 0.2, 0.5);
        assert_eq!(cfg.ngram_size, 4);
        assert!(cfg.use_parallel);
        assert_eq!(cfg.low_content_penalty, 0.5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn weights_must_sum_to_one() {
        let weights = ScoreWeights {
            semantic: 0.5,
            ..ScoreWeights::default()
        };
        assert!(matches!(
            SimilarityConfig::default().with_weights(weights).validate(),
            Err(SimilarityError::InvalidWeights(_))
        ));
    }

    #[test]
    fn negative_weights_are_rejected() {
        let weights = ScoreWeights {
            character: -0.05,
            word: 0.35,
            ..ScoreWeights::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(SimilarityError::InvalidWeights(_))
        ));
    }

    #[test]
    fn invalid_scalars() {
        let cfg = SimilarityConfig {
            version: 0,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(SimilarityError::InvalidConfigVersion { version: 0 })
        );
        assert_eq!(
            SimilarityConfig::default().with_ngram_size(0).validate(),
            Err(SimilarityError::InvalidNgramSize { n: 0 })
        );
        assert!(SimilarityConfig::default()
            .with_low_content(10, 1.5, 0.7)
            .validate()
            .is_err());
    }

    #[test]
    fn serde_roundtrip_keeps_weights() {
        let cfg = SimilarityConfig::default().with_ngram_size(5);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SimilarityConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
