//! Heuristic named-entity recognition and placeholder masking.
//!
//! Recognition runs three independent checks per whitespace token:
//!
//! 1. **Lexicon hit** (confidence 0.9): the cleaned token, or the cleaned token
//!    joined with its successor, is a known entity name.
//! 2. **Name pair** (confidence 0.8): the token and its successor look like a
//!    person's name (two known given names, a known name followed by a
//!    capitalized word, or a title/particle pattern).
//! 3. **Capitalization with context** (confidence 0.7): a capitalized word that
//!    is not a stop word, classified by indicator words within two tokens on
//!    either side.
//!
//! The checks may emit overlapping mentions for the same token. They are kept
//! as-is; [`mask_entities`] decides which mention owns each token.

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::rules::RuleStage;
use crate::token::is_placeholder;

pub const LEXICON_CONFIDENCE: f32 = 0.9;
pub const NAME_PAIR_CONFIDENCE: f32 = 0.8;
pub const CONTEXT_CONFIDENCE: f32 = 0.7;

const CONTEXT_WINDOW: usize = 2;

/// Category of a named entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Person,
    Place,
    Organization,
}

impl EntityKind {
    /// Placeholder tag written in place of a masked mention.
    pub fn tag(self) -> &'static str {
        match self {
            EntityKind::Person => "[PERSON]",
            EntityKind::Place => "[PLACE]",
            EntityKind::Organization => "[ORGANIZATION]",
        }
    }
}

/// Heuristic that produced a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionRule {
    Lexicon,
    NamePair,
    Context,
}

/// A recognized entity, addressed by whitespace-token index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub position: usize,
    pub length: usize,
    pub confidence: f32,
    pub rule: MentionRule,
}

impl EntityMention {
    /// Token indices covered by this mention.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.position..self.position + self.length
    }
}

/// Runs the three recognition heuristics against a [`Lexicon`].
#[derive(Debug, Clone, Copy)]
pub struct EntityRecognizer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> EntityRecognizer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Recognizes mentions over the whitespace tokens of `text`.
    pub fn recognize(&self, text: &str) -> Vec<EntityMention> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        self.recognize_tokens(&tokens)
    }

    /// Recognizes mentions over pre-split tokens. Positions index into `tokens`.
    pub fn recognize_tokens(&self, tokens: &[&str]) -> Vec<EntityMention> {
        let keys: Vec<String> = tokens.iter().map(|t| entity_key(t)).collect();
        let mut mentions = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            if is_placeholder(token) || keys[i].is_empty() {
                continue;
            }
            let key = keys[i].as_str();

            if let Some(kind) = self.lexicon.entity_kind(key) {
                mentions.push(EntityMention {
                    text: surface(token).to_string(),
                    kind,
                    position: i,
                    length: 1,
                    confidence: LEXICON_CONFIDENCE,
                    rule: MentionRule::Lexicon,
                });
            }

            let next = tokens
                .get(i + 1)
                .filter(|next| !is_placeholder(next) && !keys[i + 1].is_empty());
            if let Some(next) = next {
                let next_key = keys[i + 1].as_str();
                let text = format!("{} {}", surface(token), surface(next));

                if let Some(kind) = self.lexicon.entity_kind(&format!("{key} {next_key}")) {
                    mentions.push(EntityMention {
                        text: text.clone(),
                        kind,
                        position: i,
                        length: 2,
                        confidence: LEXICON_CONFIDENCE,
                        rule: MentionRule::Lexicon,
                    });
                }

                if self.is_likely_person_name(token, key, next, next_key) {
                    mentions.push(EntityMention {
                        text,
                        kind: EntityKind::Person,
                        position: i,
                        length: 2,
                        confidence: NAME_PAIR_CONFIDENCE,
                        rule: MentionRule::NamePair,
                    });
                }
            }

            if is_capitalized(token) && !self.lexicon.is_stop_word(key) {
                let start = i.saturating_sub(CONTEXT_WINDOW);
                let end = (i + CONTEXT_WINDOW + 1).min(tokens.len());
                if let Some(kind) = self.classify_by_context(&keys[start..end]) {
                    mentions.push(EntityMention {
                        text: surface(token).to_string(),
                        kind,
                        position: i,
                        length: 1,
                        confidence: CONTEXT_CONFIDENCE,
                        rule: MentionRule::Context,
                    });
                }
            }
        }

        mentions
    }

    fn is_likely_person_name(&self, raw: &str, key: &str, next_raw: &str, next_key: &str) -> bool {
        let first_is_person = self.lexicon.entity_kind(key) == Some(EntityKind::Person);
        if first_is_person && self.lexicon.entity_kind(next_key) == Some(EntityKind::Person) {
            return true;
        }
        if first_is_person && is_capitalized(next_raw) {
            return true;
        }
        let full = format!("{raw} {next_raw}");
        self.lexicon.rules().any_match(RuleStage::NameLink, &full)
    }

    fn classify_by_context(&self, window: &[String]) -> Option<EntityKind> {
        [
            EntityKind::Person,
            EntityKind::Place,
            EntityKind::Organization,
        ]
        .into_iter()
        .find(|&kind| {
            window
                .iter()
                .any(|word| !word.is_empty() && self.lexicon.is_indicator(kind, word))
        })
    }
}

/// Builds a new token sequence with every mention replaced by its tag.
///
/// Each token is owned by the covering mention with the lowest position.
/// Among mentions starting at the same position the longer span wins, then the
/// one recognized last, matching a descending-position rewrite where later
/// writes overwrite earlier ones. Consecutive tokens owned by the same mention
/// collapse into a single tag.
/// `tokens` is never mutated, so mention order has no effect on indices.
pub fn mask_entities<S: AsRef<str>>(tokens: &[S], mentions: &[EntityMention]) -> Vec<String> {
    let mut owner: Vec<Option<usize>> = vec![None; tokens.len()];
    for (idx, mention) in mentions.iter().enumerate() {
        let end = mention.span().end.min(tokens.len());
        for slot in owner.iter_mut().take(end).skip(mention.position) {
            let replace = match *slot {
                None => true,
                Some(current) => {
                    let held = &mentions[current];
                    mention.position < held.position
                        || (mention.position == held.position && mention.length >= held.length)
                }
            };
            if replace {
                *slot = Some(idx);
            }
        }
    }

    let mut masked = Vec::with_capacity(tokens.len());
    let mut previous: Option<usize> = None;
    for (token, slot) in tokens.iter().zip(owner) {
        match slot {
            Some(idx) if previous == Some(idx) => {}
            Some(idx) => masked.push(mentions[idx].kind.tag().to_string()),
            None => masked.push(token.as_ref().to_string()),
        }
        previous = slot;
    }
    masked
}

/// Lower-cased word characters of a token.
pub fn entity_key(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn surface(token: &str) -> &str {
    token.trim_matches(|c: char| !(c.is_alphanumeric() || c == '_'))
}

fn is_capitalized(token: &str) -> bool {
    let mut clean = token.chars().filter(|c| c.is_alphanumeric() || *c == '_');
    match clean.next() {
        Some(first) => first.is_uppercase() && clean.next().is_some(),
        None => false,
    }
}
