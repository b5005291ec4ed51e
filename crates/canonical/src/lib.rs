//! Plagscan text layer.
//!
//! Turns raw document text into a normalized form that downstream similarity
//! metrics can compare without being fooled by contact details, document
//! boilerplate, citations, numbers or proper names.
//!
//! ## What we do
//!
//! - Unicode NFKC normalization (configurable)
//! - Contact masking: emails, URLs, phone numbers, contact labels
//! - Structure masking: chapter/section headers, lists, page/table references
//! - Heuristic entity recognition and masking (`[PERSON]`, `[PLACE]`, `[ORGANIZATION]`)
//! - Citation removal and numeric placeholders (`[YEAR]`, `[PERCENTAGE]`, `[NUMBER]`, ...)
//! - Punctuation stripping and whitespace collapsing
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Output depends only on the
//! input text, the [`Lexicon`] and the [`NormalizeConfig`].
//!
//! ## Invariants worth knowing
//!
//! - Placeholder tags are upper-case; everything else is lower-case
//! - `normalize(normalize(x)) == normalize(x)`
//! - The lexicon is immutable once built; share it with `Arc`

mod config;
mod document;
mod entity;
mod error;
mod lexicon;
mod pipeline;
mod rules;
mod token;
mod whitespace;

pub use crate::config::NormalizeConfig;
pub use crate::document::NormalizedDocument;
pub use crate::entity::{
    entity_key, mask_entities, EntityKind, EntityMention, EntityRecognizer, MentionRule,
    CONTEXT_CONFIDENCE, LEXICON_CONFIDENCE, NAME_PAIR_CONFIDENCE,
};
pub use crate::error::{CanonicalError, LexiconError};
pub use crate::lexicon::{Lexicon, LexiconBuilder, LexiconExtension};
pub use crate::pipeline::Normalizer;
pub use crate::rules::{PatternRule, RuleSpec, RuleStage, RuleTable, BUILTIN_RULES};
pub use crate::token::{
    is_content_token, is_meaningful, is_numeric_or_symbolic, is_placeholder, split_sentences,
    tokenize, Token,
};
pub use crate::whitespace::{collapse_whitespace, lowercase_preserving_tags};
