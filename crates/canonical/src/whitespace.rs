//! Whitespace and case utilities used by the normalizer.
//!
//! # Examples
//!
//! ```rust
//! use canonical::{collapse_whitespace, lowercase_preserving_tags};
//!
//! assert_eq!(collapse_whitespace("  hello   world  "), "hello world");
//! assert_eq!(lowercase_preserving_tags("Budi [EMAIL] Rumah"), "budi [EMAIL] rumah");
//! ```

/// Collapses repeated Unicode whitespace into single ASCII spaces and trims
/// both edges.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Lower-cases `text` except for placeholder tags of the form `[UPPER_CASE]`.
///
/// Tags written by earlier normalization stages must survive case folding so
/// that a later pass recognizes them as placeholders again.
pub fn lowercase_preserving_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open].to_lowercase());
        let candidate = &rest[open..];
        match tag_len(candidate) {
            Some(len) => {
                out.push_str(&candidate[..len]);
                rest = &candidate[len..];
            }
            None => {
                out.push('[');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(&rest.to_lowercase());
    out
}

/// Byte length of a leading `[A-Z_]+]` tag, if `s` starts with one.
fn tag_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix('[')?;
    let inner = body
        .bytes()
        .take_while(|b| b.is_ascii_uppercase() || *b == b'_')
        .count();
    (inner > 0 && body.as_bytes().get(inner) == Some(&b']')).then_some(inner + 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_handles_mixed_whitespace() {
        assert_eq!(collapse_whitespace("hello\r\n\t world"), "hello world");
        assert_eq!(collapse_whitespace("hello\u{00A0}world"), "hello world");
        assert_eq!(collapse_whitespace("   \n\t   "), "");
    }

    #[test]
    fn tags_keep_their_case() {
        assert_eq!(
            lowercase_preserving_tags("Kirim ke [EMAIL] atau [CHAPTER_HEADER] BAB"),
            "kirim ke [EMAIL] atau [CHAPTER_HEADER] bab"
        );
    }

    #[test]
    fn non_tag_brackets_are_lowercased() {
        assert_eq!(lowercase_preserving_tags("[Lihat] [] [A1]"), "[lihat] [] [a1]");
        assert_eq!(lowercase_preserving_tags("akhir ["), "akhir [");
    }
}
