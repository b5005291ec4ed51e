//! The independent similarity signals.
//!
//! Every metric returns a value in `[0, 1]` and is symmetric under argument
//! swap. Metrics documented as taking *normalized* text expect the output of
//! [`Normalizer::normalize`](canonical::Normalizer::normalize); the others take
//! the raw document text.

use canonical::{is_meaningful, split_sentences, EntityMention, Lexicon, Normalizer};
use fxhash::{FxHashMap, FxHashSet};
use rayon::prelude::*;
use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::edit::word_similarity;

/// Jaccard similarity of the lower-cased character sets of two raw texts.
pub fn character_level(a: &str, b: &str) -> f64 {
    let set_a: FxHashSet<char> = a.chars().flat_map(char::to_lowercase).collect();
    let set_b: FxHashSet<char> = b.chars().flat_map(char::to_lowercase).collect();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    set_a.intersection(&set_b).count() as f64 / union as f64
}

/// Cosine similarity of raw term-frequency vectors over normalized tokens.
pub fn word_level(a: &str, b: &str) -> f64 {
    let freq_a = term_frequencies(a);
    let freq_b = term_frequencies(b);

    let norm_a: u64 = freq_a.values().map(|c| c * c).sum();
    let norm_b: u64 = freq_b.values().map(|c| c * c).sum();
    if norm_a == 0 || norm_b == 0 {
        return 0.0;
    }
    let dot: u64 = freq_a
        .iter()
        .filter_map(|(word, ca)| freq_b.get(word).map(|cb| ca * cb))
        .sum();

    // sqrt of the product keeps identical inputs at exactly 1.0
    (dot as f64 / ((norm_a as f64) * (norm_b as f64)).sqrt()).min(1.0)
}

fn term_frequencies(text: &str) -> FxHashMap<&str, u64> {
    let mut freq = FxHashMap::default();
    for token in text.split_whitespace() {
        *freq.entry(token).or_insert(0) += 1;
    }
    freq
}

/// Mean pairwise [`word_similarity`] over the cross product of meaningful
/// tokens of two normalized texts. Zero when either side has none.
///
/// Distinct words are scored once and weighted by their counts. With
/// `parallel`, rows of the cross product are spread over the rayon pool and
/// summed in order, so the result does not depend on the flag.
pub fn semantic_level(a: &str, b: &str, lexicon: &Lexicon, parallel: bool) -> f64 {
    let (words_a, total_a) = meaningful_counts(a, lexicon);
    let (words_b, total_b) = meaningful_counts(b, lexicon);
    if total_a == 0 || total_b == 0 {
        return 0.0;
    }

    let row = |(word_a, count_a): &(&str, usize)| -> f64 {
        let row_sum: f64 = words_b
            .iter()
            .map(|(word_b, count_b)| *count_b as f64 * word_similarity(word_a, word_b, lexicon))
            .sum();
        *count_a as f64 * row_sum
    };

    let rows: Vec<f64> = if parallel {
        words_a.par_iter().map(row).collect()
    } else {
        words_a.iter().map(row).collect()
    };

    let score = rows.iter().sum::<f64>() / (total_a as f64 * total_b as f64);
    score.clamp(0.0, 1.0)
}

/// Distinct meaningful words in order of first appearance, with counts.
fn meaningful_counts<'t>(text: &'t str, lexicon: &Lexicon) -> (Vec<(&'t str, usize)>, usize) {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut words: Vec<(&str, usize)> = Vec::new();
    let mut total = 0;
    for token in text.split_whitespace().filter(|t| is_meaningful(t, lexicon)) {
        total += 1;
        match index.get(token) {
            Some(&slot) => words[slot].1 += 1,
            None => {
                index.insert(token, words.len());
                words.push((token, 1));
            }
        }
    }
    (words, total)
}

/// Average of mean-sentence-length similarity and sentence-count similarity
/// of two raw texts. Sentence length is measured in words.
pub fn structural_level(a: &str, b: &str) -> f64 {
    let sentences_a = split_sentences(a);
    let sentences_b = split_sentences(b);
    if sentences_a.is_empty() || sentences_b.is_empty() {
        return 0.0;
    }

    let length_similarity = ratio_similarity(mean_words(&sentences_a), mean_words(&sentences_b));
    let count_similarity = ratio_similarity(sentences_a.len() as f64, sentences_b.len() as f64);

    (length_similarity + count_similarity) / 2.0
}

fn mean_words(sentences: &[&str]) -> f64 {
    let words: usize = sentences.iter().map(|s| s.split_whitespace().count()).sum();
    words as f64 / sentences.len() as f64
}

fn ratio_similarity(x: f64, y: f64) -> f64 {
    let max = x.max(y);
    if max <= 0.0 {
        return 1.0;
    }
    1.0 - (x - y).abs() / max
}

/// Word-level similarity after removing every mention's literal text from
/// both raw texts, then normalizing them.
pub fn entity_filtered(
    a: &str,
    b: &str,
    mentions: &[&EntityMention],
    normalizer: &Normalizer,
) -> f64 {
    let mut filtered_a = a.to_lowercase();
    let mut filtered_b = b.to_lowercase();
    if let Some(pattern) = mention_pattern(mentions) {
        filtered_a = pattern.replace_all(&filtered_a, "").into_owned();
        filtered_b = pattern.replace_all(&filtered_b, "").into_owned();
    }
    word_level(
        &normalizer.normalize(&filtered_a),
        &normalizer.normalize(&filtered_b),
    )
}

/// One case-insensitive, word-bounded alternation of all mention texts,
/// longest first so multi-word mentions win over their parts.
fn mention_pattern(mentions: &[&EntityMention]) -> Option<Regex> {
    let mut texts: Vec<String> = mentions
        .iter()
        .map(|m| m.text.to_lowercase())
        .filter(|t| !t.trim().is_empty())
        .collect();
    if texts.is_empty() {
        return None;
    }
    texts.sort_by(|x, y| y.chars().count().cmp(&x.chars().count()).then(x.cmp(y)));
    texts.dedup();

    let alternation = texts
        .iter()
        .map(|t| {
            t.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|");
    match RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
        .case_insensitive(true)
        .build()
    {
        Ok(regex) => Some(regex),
        Err(err) => {
            warn!(error = %err, mentions = texts.len(), "entity_filter_pattern_failed");
            None
        }
    }
}
