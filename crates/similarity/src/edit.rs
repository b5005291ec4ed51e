//! Edit distance, stemming and pairwise word similarity.

use canonical::Lexicon;

pub const STEM_MATCH_SCORE: f64 = 0.9;
pub const SYNONYM_SCORE: f64 = 0.8;

const INDONESIAN_SUFFIXES: &[&str] = &["nya", "kan", "an", "i"];
const ENGLISH_SUFFIXES: &[&str] = &["tion", "sion", "ing", "est", "ed", "er", "ly"];

/// Levenshtein distance over Unicode scalar values, two-row DP.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// `1 - levenshtein / max_len`, with two empty strings scoring 1.0.
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Strips one Indonesian suffix, then one English suffix, longest first.
pub fn simple_stem(word: &str) -> &str {
    let word = strip_longest(word, INDONESIAN_SUFFIXES);
    strip_longest(word, ENGLISH_SUFFIXES)
}

fn strip_longest<'a>(word: &'a str, suffixes: &[&str]) -> &'a str {
    suffixes
        .iter()
        .filter_map(|suffix| word.strip_suffix(suffix))
        .min_by_key(|stem| stem.len())
        .unwrap_or(word)
}

/// Similarity of two lower-case words in `[0, 1]`.
///
/// Exact matches score 1.0 and shared stems 0.9; otherwise the larger of the
/// edit similarity and the synonym score.
pub fn word_similarity(a: &str, b: &str, lexicon: &Lexicon) -> f64 {
    if a == b {
        return 1.0;
    }
    if simple_stem(a) == simple_stem(b) {
        return STEM_MATCH_SCORE;
    }
    let synonym = if lexicon.same_synonym_group(a, b) {
        SYNONYM_SCORE
    } else {
        0.0
    };
    edit_similarity(a, b).max(synonym)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("sama", "sama"), 0);
        assert_eq!(levenshtein("café", "cafe"), 1);
    }

    #[test]
    fn edit_similarity_is_normalized() {
        assert_eq!(edit_similarity("", ""), 1.0);
        assert!((edit_similarity("kitten", "sitting") - (1.0 - 3.0 / 7.0)).abs() < 1e-12);
        assert_eq!(edit_similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn stems_strip_one_suffix_per_family() {
        assert_eq!(simple_stem("makanan"), "makan");
        assert_eq!(simple_stem("bukunya"), "buku");
        assert_eq!(simple_stem("running"), "runn");
        assert_eq!(simple_stem("information"), "informa");
        assert_eq!(simple_stem("meja"), "meja");
    }

    #[test]
    fn word_similarity_ladder() {
        let lexicon = Lexicon::builtin().unwrap();
        assert_eq!(word_similarity("metode", "metode", &lexicon), 1.0);
        assert_eq!(word_similarity("bukunya", "buku", &lexicon), STEM_MATCH_SCORE);
        assert_eq!(word_similarity("metode", "approach", &lexicon), SYNONYM_SCORE);
        let edit = word_similarity("klasifikasi", "klasifikasu", &lexicon);
        assert!((edit - (1.0 - 1.0 / 11.0)).abs() < 1e-12);
    }

    #[test]
    fn word_similarity_is_symmetric() {
        let lexicon = Lexicon::builtin().unwrap();
        for (a, b) in [("riset", "study"), ("jaringan", "jaring"), ("model", "modul")] {
            assert_eq!(
                word_similarity(a, b, &lexicon),
                word_similarity(b, a, &lexicon)
            );
        }
    }
}
