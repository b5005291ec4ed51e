use canonical::{
    is_content_token, EntityMention, EntityRecognizer, Lexicon, NormalizedDocument, Normalizer,
};
use serde::{Deserialize, Serialize};

use crate::config::{SimilarityConfig, SimilarityError};
use crate::metrics::{character_level, entity_filtered, semantic_level, structural_level, word_level};
use crate::ngram::{ngram_similarity, smart_ngrams};

/// Piecewise-linear compression: identity below 0.3, then slopes of 0.8, 0.6
/// and 0.4 on `[0.3, 0.6)`, `[0.6, 0.8)` and `[0.8, ..)`.
pub fn diminishing_returns(score: f64) -> f64 {
    if score < 0.3 {
        score
    } else if score < 0.6 {
        0.3 + (score - 0.3) * 0.8
    } else if score < 0.8 {
        0.54 + (score - 0.6) * 0.6
    } else {
        0.66 + (score - 0.8) * 0.4
    }
}

/// Share of meaningful tokens in a normalized document; zero when empty.
pub fn content_ratio(doc: &NormalizedDocument, lexicon: &Lexicon) -> f64 {
    if doc.tokens.is_empty() {
        return 0.0;
    }
    doc.meaningful_count(lexicon) as f64 / doc.tokens.len() as f64
}

/// Mean of the two documents' [`content_ratio`].
pub fn content_quality(a: &NormalizedDocument, b: &NormalizedDocument, lexicon: &Lexicon) -> f64 {
    (content_ratio(a, lexicon) + content_ratio(b, lexicon)) / 2.0
}

/// Too few content tokens, or too small a share of them.
pub fn is_low_content(doc: &NormalizedDocument, lexicon: &Lexicon, config: &SimilarityConfig) -> bool {
    let content = doc
        .tokens
        .iter()
        .filter(|t| is_content_token(&t.text, lexicon))
        .count();
    if content < config.low_content_min_tokens {
        return true;
    }
    content as f64 / (doc.tokens.len() as f64) < config.low_content_min_ratio
}

/// A document prepared once and reused by every metric.
#[derive(Debug, Clone)]
pub struct PreparedText<'t> {
    pub raw: &'t str,
    pub normalized: NormalizedDocument,
    /// Mentions recognized on the raw text.
    pub mentions: Vec<EntityMention>,
}

/// Per-level scores and the composed result for one document pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityAnalysis {
    pub character_level: f64,
    pub word_level: f64,
    pub semantic_level: f64,
    pub structural_level: f64,
    pub entity_filtered: f64,
    pub content_quality: f64,
    pub adjusted_word_level: f64,
    pub adjusted_semantic_level: f64,
    /// Weighted sum before the low-content penalty.
    pub weighted_score: f64,
    pub final_score: f64,
    pub low_content: bool,
}

/// Computes every similarity level for a document pair and composes them.
///
/// The composed score is `weighted_score`, scaled by the low-content penalty
/// when either text is low content. It is never clamped here.
#[derive(Debug, Clone)]
pub struct SimilarityAnalyzer {
    normalizer: Normalizer,
    config: SimilarityConfig,
}

impl SimilarityAnalyzer {
    pub fn new(normalizer: Normalizer, config: SimilarityConfig) -> Result<Self, SimilarityError> {
        config.validate()?;
        Ok(Self { normalizer, config })
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn lexicon(&self) -> &Lexicon {
        self.normalizer.lexicon()
    }

    /// Normalizes `raw` and recognizes its entity mentions.
    pub fn prepare<'t>(&self, raw: &'t str) -> PreparedText<'t> {
        PreparedText {
            raw,
            normalized: self.normalizer.normalize_document(raw),
            mentions: EntityRecognizer::new(self.lexicon()).recognize(raw),
        }
    }

    pub fn analyze(&self, target: &str, source: &str) -> SimilarityAnalysis {
        self.analyze_prepared(&self.prepare(target), &self.prepare(source))
    }

    pub fn analyze_prepared(&self, target: &PreparedText<'_>, source: &PreparedText<'_>) -> SimilarityAnalysis {
        let lexicon = self.lexicon();
        let (norm_t, norm_s) = (&target.normalized.text, &source.normalized.text);

        let character = character_level(target.raw, source.raw);
        let word = word_level(norm_t, norm_s);
        let semantic = semantic_level(norm_t, norm_s, lexicon, self.config.use_parallel);
        let structural = structural_level(target.raw, source.raw);
        let mentions: Vec<&EntityMention> =
            target.mentions.iter().chain(source.mentions.iter()).collect();
        let entity = entity_filtered(target.raw, source.raw, &mentions, &self.normalizer);
        let quality = content_quality(&target.normalized, &source.normalized, lexicon);

        let adjusted_word = diminishing_returns(word);
        let adjusted_semantic = diminishing_returns(semantic);

        let w = &self.config.weights;
        let weighted = w.character * character
            + w.word * adjusted_word
            + w.semantic * adjusted_semantic
            + w.structural * structural
            + w.entity_filtered * entity
            + w.content_quality * quality;

        let low_content = is_low_content(&target.normalized, lexicon, &self.config)
            || is_low_content(&source.normalized, lexicon, &self.config);
        let final_score = if low_content {
            weighted * self.config.low_content_penalty
        } else {
            weighted
        };

        SimilarityAnalysis {
            character_level: character,
            word_level: word,
            semantic_level: semantic,
            structural_level: structural,
            entity_filtered: entity,
            content_quality: quality,
            adjusted_word_level: adjusted_word,
            adjusted_semantic_level: adjusted_semantic,
            weighted_score: weighted,
            final_score,
            low_content,
        }
    }

    /// Smart n-grams of a prepared text at the configured size.
    pub fn ngrams(&self, text: &PreparedText<'_>) -> Vec<String> {
        smart_ngrams(&text.normalized.text, self.config.ngram_size, self.lexicon())
    }

    /// Jaccard similarity of the two texts' smart n-gram sets.
    pub fn ngram_similarity(&self, target: &PreparedText<'_>, source: &PreparedText<'_>) -> f64 {
        ngram_similarity(&self.ngrams(target), &self.ngrams(source))
    }
}
