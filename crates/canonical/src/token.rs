use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;

/// A token with its UTF-8 byte offsets in the normalized text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The token text content.
    pub text: String,
    /// Byte offset (inclusive) in the normalized text.
    pub start: usize,
    /// Byte offset (exclusive) in the normalized text.
    pub end: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Tokenizes normalized text and produces byte offsets.
///
/// Tokens are separated by Unicode whitespace. The helper is deterministic
/// and cross-platform.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(token_start) = start.take() {
                tokens.push(Token {
                    text: text[token_start..idx].to_string(),
                    start: token_start,
                    end: idx,
                });
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }

    if let Some(token_start) = start {
        tokens.push(Token {
            text: text[token_start..].to_string(),
            start: token_start,
            end: text.len(),
        });
    }

    tokens
}

/// Splits on runs of `.`, `!` and `?`, trims each part and drops blank ones.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Bracketed placeholder written by normalization, e.g. `[PERSON]`.
pub fn is_placeholder(token: &str) -> bool {
    token.starts_with('[')
}

/// Single characters and tokens made only of digits and arithmetic symbols.
pub fn is_numeric_or_symbolic(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (None, _) => false,
        (Some(_), None) => true,
        _ => token
            .chars()
            .all(|c| c.is_ascii_digit() || "+-*/=()[]".contains(c)),
    }
}

/// Longer than two characters, not a placeholder and not a stop word.
pub fn is_meaningful(token: &str, lexicon: &Lexicon) -> bool {
    token.chars().count() > 2 && !is_placeholder(token) && !lexicon.is_stop_word(token)
}

/// A meaningful token that is also not purely numeric or symbolic.
pub fn is_content_token(token: &str, lexicon: &Lexicon) -> bool {
    is_meaningful(token, lexicon) && !is_numeric_or_symbolic(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_tracks_byte_offsets() {
        let tokens = tokenize("  kata  ganda\tlagi ");
        let spans: Vec<_> = tokens
            .iter()
            .map(|t| (t.text.as_str(), t.start, t.end))
            .collect();
        assert_eq!(spans, [("kata", 2, 6), ("ganda", 8, 13), ("lagi", 14, 18)]);
    }

    #[test]
    fn tokenize_multibyte() {
        let tokens = tokenize("café ok");
        assert_eq!(tokens[0].end, 5);
        assert_eq!(tokens[1].start, 6);
    }

    #[test]
    fn sentences_split_on_terminal_runs() {
        assert_eq!(
            split_sentences("Satu. Dua!? Tiga...  . "),
            ["Satu", "Dua", "Tiga"]
        );
        assert!(split_sentences("  ...  ").is_empty());
    }

    #[test]
    fn numeric_and_symbolic_tokens() {
        assert!(is_numeric_or_symbolic("x"));
        assert!(is_numeric_or_symbolic("12+3"));
        assert!(is_numeric_or_symbolic("(4)"));
        assert!(!is_numeric_or_symbolic("12a"));
        assert!(!is_numeric_or_symbolic(""));
    }

    #[test]
    fn meaningful_and_content_tokens() {
        let lexicon = Lexicon::builtin().unwrap();
        assert!(is_meaningful("klasifikasi", &lexicon));
        assert!(!is_meaningful("yang", &lexicon));
        assert!(!is_meaningful("[person]", &lexicon));
        assert!(!is_meaningful("ab", &lexicon));
        assert!(is_meaningful("123", &lexicon));
        assert!(!is_content_token("123", &lexicon));
        assert!(is_content_token("klasifikasi", &lexicon));
    }
}
