//! Sentence-level predicates and phrase extraction.
//!
//! These work on raw sentences, lower-cased and split on whitespace, so the
//! phrases they report read the way the author wrote them.

use fxhash::FxHashSet;

use canonical::{is_numeric_or_symbolic, is_placeholder, Lexicon};

/// Shortest phrase reported by [`extract_common_phrases`].
pub const MIN_PHRASE_TOKENS: usize = 3;
/// Longest phrase reported by [`extract_common_phrases`].
pub const MAX_PHRASE_TOKENS: usize = 8;

fn lowered_words(sentence: &str) -> Vec<String> {
    sentence.split_whitespace().map(str::to_lowercase).collect()
}

/// Whether a sentence carries enough content to be worth comparing: at least
/// `min_tokens` meaningful words making up at least `min_ratio` of all words.
pub fn has_meaningful_content(
    sentence: &str,
    lexicon: &Lexicon,
    min_tokens: usize,
    min_ratio: f64,
) -> bool {
    let words = lowered_words(sentence);
    if words.is_empty() {
        return false;
    }
    let meaningful = words
        .iter()
        .filter(|w| {
            w.chars().count() > 2 && !lexicon.is_stop_word(w) && !is_numeric_or_symbolic(w)
        })
        .count();
    meaningful >= min_tokens && meaningful as f64 / words.len() as f64 >= min_ratio
}

/// Lower-cased words longer than three characters that are not stop words,
/// numbers or placeholders. Duplicates are kept.
pub fn distinctive_tokens(sentence: &str, lexicon: &Lexicon) -> Vec<String> {
    lowered_words(sentence)
        .into_iter()
        .filter(|w| {
            w.chars().count() > 3
                && !lexicon.is_stop_word(w)
                && !is_numeric_or_symbolic(w)
                && !is_placeholder(w)
        })
        .collect()
}

/// Number of distinctive tokens of `a` (with repetition) that also occur in `b`.
pub fn distinctive_overlap(a: &[String], b: &[String]) -> usize {
    let in_b: FxHashSet<&str> = b.iter().map(String::as_str).collect();
    a.iter().filter(|w| in_b.contains(w.as_str())).count()
}

/// Overlap ratio of distinctive tokens plus a bonus of one per 200 characters
/// of the shorter sentence.
pub fn significance_score(a: &str, b: &str, lexicon: &Lexicon) -> f64 {
    let tokens_a = distinctive_tokens(a, lexicon);
    let tokens_b = distinctive_tokens(b, lexicon);
    let overlap = distinctive_overlap(&tokens_a, &tokens_b);
    let denom = tokens_a.len().max(tokens_b.len()).max(1);
    let length_bonus = a.chars().count().min(b.chars().count()) as f64 / 200.0;
    overlap as f64 / denom as f64 + length_bonus
}

/// Contiguous word sequences of 3 to 8 words shared by both sentences.
///
/// Phrases containing a lexicon common phrase are dropped. The result is
/// deduplicated, ordered longest first (first occurrence in `a` breaks
/// ties) and capped at `max`.
pub fn extract_common_phrases(a: &str, b: &str, lexicon: &Lexicon, max: usize) -> Vec<String> {
    let words_a = lowered_words(a);
    let words_b = lowered_words(b);
    let longest = words_a.len().min(words_b.len()).min(MAX_PHRASE_TOKENS);

    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut phrases: Vec<String> = Vec::new();
    for len in MIN_PHRASE_TOKENS..=longest {
        let in_b: FxHashSet<String> = words_b.windows(len).map(|w| w.join(" ")).collect();
        for window in words_a.windows(len) {
            let phrase = window.join(" ");
            if in_b.contains(&phrase)
                && !lexicon.is_common_phrase(&phrase)
                && seen.insert(phrase.clone())
            {
                phrases.push(phrase);
            }
        }
    }

    // stable: ties keep discovery order
    phrases.sort_by(|x, y| {
        let lx = x.split_whitespace().count();
        let ly = y.split_whitespace().count();
        ly.cmp(&lx)
    });
    phrases.truncate(max);
    phrases
}

/// First `max_chars` characters of `sentence`, with `...` appended when cut.
pub fn truncate_for_display(sentence: &str, max_chars: usize) -> String {
    match sentence.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &sentence[..cut]),
        None => sentence.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::builtin().unwrap()
    }

    #[test]
    fn meaningful_content_needs_count_and_ratio() {
        let lexicon = lexicon();
        assert!(has_meaningful_content(
            "model klasifikasi teks otomatis",
            &lexicon,
            3,
            0.3
        ));
        assert!(!has_meaningful_content("dan yang di ke dari", &lexicon, 3, 0.3));
        assert!(!has_meaningful_content("", &lexicon, 3, 0.3));
        // two meaningful words are not enough
        assert!(!has_meaningful_content("klasifikasi teks", &lexicon, 3, 0.3));
    }

    #[test]
    fn distinctive_tokens_filter_short_and_placeholder_words() {
        let lexicon = lexicon();
        let tokens = distinctive_tokens("Model [PERSON] dan teks 2020 klasifikasi", &lexicon);
        assert_eq!(tokens, ["model", "teks", "klasifikasi"]);
    }

    #[test]
    fn overlap_counts_repetitions_from_the_left() {
        let a = vec!["data".to_string(), "data".to_string(), "model".to_string()];
        let b = vec!["data".to_string()];
        assert_eq!(distinctive_overlap(&a, &b), 2);
        assert_eq!(distinctive_overlap(&b, &a), 1);
    }

    #[test]
    fn significance_combines_overlap_and_length() {
        let lexicon = lexicon();
        let s = "model klasifikasi teks";
        let expected = 1.0 + s.chars().count() as f64 / 200.0;
        assert!((significance_score(s, s, &lexicon) - expected).abs() < 1e-12);
        assert!(significance_score("", "", &lexicon).abs() < 1e-12);
    }

    #[test]
    fn common_phrases_longest_first() {
        let lexicon = lexicon();
        let a = "kami membangun model klasifikasi teks otomatis untuk berita";
        let b = "mereka membangun model klasifikasi teks otomatis lain";
        let phrases = extract_common_phrases(a, b, &lexicon, 10);
        assert_eq!(phrases[0], "membangun model klasifikasi teks otomatis");
        assert!(phrases.contains(&"model klasifikasi teks".to_string()));
        assert!(phrases.windows(2).all(|w| {
            w[0].split_whitespace().count() >= w[1].split_whitespace().count()
        }));
        assert_eq!(extract_common_phrases(a, b, &lexicon, 2).len(), 2);
    }

    #[test]
    fn repeated_phrases_are_reported_once() {
        let lexicon = lexicon();
        let a = "model klasifikasi teks dan model klasifikasi teks";
        let b = "model klasifikasi teks baru";
        assert_eq!(
            extract_common_phrases(a, b, &lexicon, 10),
            ["model klasifikasi teks"]
        );
    }

    #[test]
    fn denylisted_common_phrases_are_excluded() {
        let lexicon = lexicon();
        let a = "berdasarkan hasil penelitian kucing suka tidur siang";
        let b = "berdasarkan hasil penelitian harga beras naik tajam";
        let phrases = extract_common_phrases(a, b, &lexicon, 10);
        assert!(
            !phrases.iter().any(|p| p.contains("berdasarkan hasil")),
            "{phrases:?}"
        );
        assert!(phrases.is_empty());
    }

    #[test]
    fn short_sentences_share_no_phrases() {
        let lexicon = lexicon();
        assert!(extract_common_phrases("satu dua", "satu dua", &lexicon, 10).is_empty());
    }

    #[test]
    fn display_truncation_is_char_based() {
        assert_eq!(truncate_for_display("abcdef", 3), "abc...");
        assert_eq!(truncate_for_display("abc", 3), "abc");
        assert_eq!(truncate_for_display("ééééé", 2), "éé...");
    }
}
