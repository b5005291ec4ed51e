use thiserror::Error;

/// Errors that can occur during normalization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised while building a [`Lexicon`](crate::Lexicon).
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("rule `{rule}` has an invalid pattern: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },
    #[error("lexicon entry is empty in {0}")]
    EmptyEntry(&'static str),
    #[error("synonym group {0} needs at least two words")]
    DegenerateSynonymGroup(usize),
    #[error("failed to parse lexicon: {0}")]
    Parse(#[from] serde_yaml::Error),
}
