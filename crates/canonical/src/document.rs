//! Output of the normalizer.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use canonical::{Lexicon, NormalizeConfig, Normalizer};
//!
//! let normalizer = Normalizer::new(
//!     Arc::new(Lexicon::builtin().unwrap()),
//!     NormalizeConfig::default(),
//! )
//! .unwrap();
//! let doc = normalizer.normalize_document("Budi tinggal di Malang sejak 2019.");
//!
//! assert_eq!(doc.text, "[PERSON] tinggal di [PLACE] sejak [YEAR]");
//! assert_eq!(doc.tokens[0].text, "[PERSON]");
//! ```

use serde::{Deserialize, Serialize};

use crate::entity::EntityMention;
use crate::lexicon::Lexicon;
use crate::token::{is_content_token, is_meaningful, Token};

/// Normalized text plus the artifacts produced while normalizing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedDocument {
    /// Normalized text: lower-case words and upper-case placeholder tags
    /// separated by single spaces.
    pub text: String,

    /// Tokens with byte offsets into `text`.
    pub tokens: Vec<Token>,

    /// Mentions recognized during the first pass, indexed by the whitespace
    /// tokens of the text after contact and structure masking.
    pub mentions: Vec<EntityMention>,

    /// Full passes run before the text reached a fixed point.
    pub passes: usize,

    /// [`NormalizeConfig::version`](crate::NormalizeConfig::version) used.
    pub normalize_version: u32,
}

impl NormalizedDocument {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn meaningful_count(&self, lexicon: &Lexicon) -> usize {
        self.tokens
            .iter()
            .filter(|t| is_meaningful(&t.text, lexicon))
            .count()
    }

    pub fn content_count(&self, lexicon: &Lexicon) -> usize {
        self.tokens
            .iter()
            .filter(|t| is_content_token(&t.text, lexicon))
            .count()
    }
}
