//! Smart n-gram extraction.
//!
//! A window of `n` normalized tokens becomes an n-gram only when it carries
//! real content: at least `ceil(0.8 * n)` (and at least two) content tokens,
//! and its joined text does not match any boilerplate rule.

use canonical::{is_content_token, Lexicon, RuleStage};
use fxhash::FxHashSet;

const CONTENT_SHARE: f64 = 0.8;

/// N-grams of a normalized text, in order of appearance. Duplicates are kept.
pub fn smart_ngrams(normalized: &str, n: usize, lexicon: &Lexicon) -> Vec<String> {
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    let required = ((n as f64 * CONTENT_SHARE).ceil() as usize).max(2);

    tokens
        .windows(n)
        .filter(|window| {
            window
                .iter()
                .filter(|t| is_content_token(t, lexicon))
                .count()
                >= required
        })
        .map(|window| window.join(" "))
        .filter(|gram| {
            !lexicon
                .rules()
                .any_match(RuleStage::NgramBoilerplate, &gram.to_lowercase())
        })
        .collect()
}

/// Jaccard similarity of two n-gram sets. Zero when either side is empty.
pub fn ngram_similarity<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let set_a: FxHashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let set_b: FxHashSet<&str> = b.iter().map(AsRef::as_ref).collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.len() + set_b.len() - intersection;
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_windows_become_ngrams() {
        let lexicon = Lexicon::builtin().unwrap();
        let grams = smart_ngrams("klasifikasi teks otomatis berbasis", 3, &lexicon);
        assert_eq!(
            grams,
            ["klasifikasi teks otomatis", "teks otomatis berbasis"]
        );
    }

    #[test]
    fn stop_words_and_tags_break_windows() {
        let lexicon = Lexicon::builtin().unwrap();
        // "dan" and "[PERSON]" leave at most one content token per window
        let grams = smart_ngrams("klasifikasi dan [PERSON] teks", 3, &lexicon);
        assert!(grams.is_empty(), "{grams:?}");
    }

    #[test]
    fn boilerplate_windows_are_dropped() {
        let lexicon = Lexicon::builtin().unwrap();
        assert!(smart_ngrams("tabel 123x menunjukkan grafik", 4, &lexicon).is_empty());
        assert_eq!(
            smart_ngrams("lihat tabel 123x menunjukkan", 4, &lexicon),
            ["lihat tabel 123x menunjukkan"]
        );
    }

    #[test]
    fn short_inputs_and_zero_n() {
        let lexicon = Lexicon::builtin().unwrap();
        assert!(smart_ngrams("dua kata", 3, &lexicon).is_empty());
        assert!(smart_ngrams("klasifikasi teks otomatis", 0, &lexicon).is_empty());
    }

    #[test]
    fn jaccard_over_sets() {
        let a = ["x y z", "y z w", "x y z"];
        let b = ["y z w", "p q r"];
        assert!((ngram_similarity(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(ngram_similarity(&a, &a), 1.0);
        assert_eq!(ngram_similarity::<&str>(&[], &b), 0.0);
    }
}
