use canonical::{split_sentences, Lexicon, Normalizer, RuleStage};
use rayon::prelude::*;
use similarity::semantic_level;
use tracing::debug;

use crate::phrases::{
    distinctive_overlap, distinctive_tokens, extract_common_phrases, has_meaningful_content,
    significance_score, truncate_for_display,
};
use crate::types::{ExcerptMatch, MatchError, MatcherConfig};


/// Common phrases extracted per sentence pair before the per-excerpt cap.
pub const MAX_COMMON_PHRASES: usize = 10;

/// True when one academic-phrasing rule matches both sentences.
pub fn shares_academic_phrasing(a: &str, b: &str, lexicon: &Lexicon) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    lexicon
        .rules()
        .stage(RuleStage::AcademicPhrasing)
        .any(|rule| rule.is_match(&a) && rule.is_match(&b))
}

/// Semantic-level similarity of two raw sentences, scaled by
/// `academic_penalty` when both use the same stock academic phrasing.
pub fn enhanced_similarity(a: &str, b: &str, normalizer: &Normalizer, academic_penalty: f64) -> f64 {
    penalized_similarity(
        a,
        b,
        &normalizer.normalize(a),
        &normalizer.normalize(b),
        normalizer.lexicon(),
        academic_penalty,
    )
}

/// [`enhanced_similarity`] over sentences whose normalized forms are already
/// known. The raw forms are only used for the academic-phrasing check.
pub fn penalized_similarity(
    raw_a: &str,
    raw_b: &str,
    normalized_a: &str,
    normalized_b: &str,
    lexicon: &Lexicon,
    academic_penalty: f64,
) -> f64 {
    let base = semantic_level(normalized_a, normalized_b, lexicon, false);
    if shares_academic_phrasing(raw_a, raw_b, lexicon) {
        base * academic_penalty
    } else {
        base
    }
}

/// A candidate sentence with the pieces every comparison needs.
struct Sentence<'t> {
    index: usize,
    raw: &'t str,
    normalized: String,
    distinctive: Vec<String>,
}

/// Finds and ranks pairs of similar sentences across two documents.
///
/// Every target sentence is compared with every source sentence, so cost is
/// `O(S1 * S2)`. With [`MatcherConfig::use_parallel`] target sentences are
/// spread over the rayon pool; results are gathered in index order before the
/// stable ranking sort, so output is identical either way.
#[derive(Debug, Clone)]
pub struct ExcerptMatcher {
    normalizer: Normalizer,
    config: MatcherConfig,
}

impl ExcerptMatcher {
    pub fn new(normalizer: Normalizer, config: MatcherConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self { normalizer, config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        self.normalizer.lexicon()
    }

    /// Sentences long enough and rich enough to compare, in document order.
    pub fn candidate_sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        split_sentences(text)
            .into_iter()
            .filter(|s| {
                s.chars().count() > self.config.min_sentence_chars
                    && has_meaningful_content(
                        s,
                        self.lexicon(),
                        self.config.min_meaningful_tokens,
                        self.config.min_meaningful_ratio,
                    )
            })
            .collect()
    }

    fn prepare<'t>(&self, text: &'t str) -> Vec<Sentence<'t>> {
        self.candidate_sentences(text)
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Sentence {
                index,
                raw,
                normalized: self.normalizer.normalize(raw),
                distinctive: distinctive_tokens(raw, self.lexicon()),
            })
            .collect()
    }

    /// Up to `max_excerpts` similar sentence pairs, most significant first.
    pub fn find_similar_excerpts(&self, target: &str, source: &str) -> Vec<ExcerptMatch> {
        let targets = self.prepare(target);
        let sources = self.prepare(source);
        let sources = &sources;

        let mut excerpts: Vec<ExcerptMatch> = if self.config.use_parallel {
            targets
                .par_iter()
                .flat_map_iter(|t| sources.iter().filter_map(move |s| self.compare(t, s)))
                .collect()
        } else {
            targets
                .iter()
                .flat_map(|t| sources.iter().filter_map(move |s| self.compare(t, s)))
                .collect()
        };

        debug!(
            targets = targets.len(),
            sources = sources.len(),
            kept = excerpts.len(),
            "excerpt_candidates"
        );

        excerpts.sort_by(|a, b| b.rank().total_cmp(&a.rank()));
        excerpts.truncate(self.config.max_excerpts);
        excerpts
    }

    fn compare(&self, target: &Sentence<'_>, source: &Sentence<'_>) -> Option<ExcerptMatch> {
        let lexicon = self.lexicon();
        let similarity = penalized_similarity(
            target.raw,
            source.raw,
            &target.normalized,
            &source.normalized,
            lexicon,
            self.config.academic_penalty,
        );
        if similarity <= self.config.similarity_threshold {
            return None;
        }

        let overlap = distinctive_overlap(&target.distinctive, &source.distinctive);
        if overlap < self.config.min_distinctive_overlap
            && similarity <= self.config.strong_similarity
        {
            return None;
        }

        let mut common_phrases =
            extract_common_phrases(target.raw, source.raw, lexicon, MAX_COMMON_PHRASES);
        common_phrases.truncate(self.config.phrases_per_excerpt);

        Some(ExcerptMatch {
            target_sentence: truncate_for_display(target.raw, self.config.display_chars),
            source_sentence: truncate_for_display(source.raw, self.config.display_chars),
            similarity_percent: (similarity * 100.0).round() as u32,
            common_phrases,
            target_index: target.index,
            source_index: source.index,
            significance_score: significance_score(target.raw, source.raw, lexicon),
        })
    }
}
