use std::sync::Arc;

use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use crate::config::NormalizeConfig;
use crate::document::NormalizedDocument;
use crate::entity::{mask_entities, EntityMention, EntityRecognizer};
use crate::error::CanonicalError;
use crate::lexicon::Lexicon;
use crate::rules::RuleStage;
use crate::token::tokenize;
use crate::whitespace::{collapse_whitespace, lowercase_preserving_tags};

/// Five-stage text normalizer.
///
/// Each pass runs, in order: contact masking, structure masking, entity
/// masking with case folding, numeric/citation normalization, and punctuation
/// stripping with whitespace collapse. Passes repeat until the text stops
/// changing or [`NormalizeConfig::max_passes`] is reached, so normalizing an
/// already normalized text returns it unchanged.
#[derive(Debug, Clone)]
pub struct Normalizer {
    lexicon: Arc<Lexicon>,
    config: NormalizeConfig,
}

impl Normalizer {
    pub fn new(lexicon: Arc<Lexicon>, config: NormalizeConfig) -> Result<Self, CanonicalError> {
        config.validate()?;
        Ok(Self { lexicon, config })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Normalized text only.
    pub fn normalize(&self, text: &str) -> String {
        self.normalize_document(text).text
    }

    /// Normalized text with tokens, first-pass entity mentions and the number
    /// of passes it took to reach a fixed point.
    pub fn normalize_document(&self, text: &str) -> NormalizedDocument {
        let mut current: String = if self.config.normalize_unicode {
            text.nfkc().collect()
        } else {
            text.to_string()
        };

        let mut mentions: Option<Vec<EntityMention>> = None;
        let mut passes = 0;
        loop {
            let (next, found) = self.run_pass(&current);
            passes += 1;
            mentions.get_or_insert(found);
            let stable = next == current;
            current = next;
            if stable {
                break;
            }
            if passes >= self.config.max_passes {
                warn!(
                    passes,
                    text_len = current.len(),
                    "normalization_pass_limit"
                );
                break;
            }
        }

        NormalizedDocument {
            tokens: tokenize(&current),
            text: current,
            mentions: mentions.unwrap_or_default(),
            passes,
            normalize_version: self.config.version,
        }
    }

    fn run_pass(&self, text: &str) -> (String, Vec<EntityMention>) {
        let rules = self.lexicon.rules();
        let text = rules.apply_stage(RuleStage::Contact, text);
        let text = rules.apply_stage(RuleStage::Structure, &text);
        let (text, mentions) = self.mask_stage(&text);
        let text = rules.apply_stage(RuleStage::Reference, &text);
        let text = rules.apply_stage(RuleStage::Punctuation, &text);
        (collapse_whitespace(&text), mentions)
    }

    fn mask_stage(&self, text: &str) -> (String, Vec<EntityMention>) {
        let raw: Vec<&str> = text.split_whitespace().collect();
        let lowered: Vec<String> = raw.iter().map(|t| lowercase_preserving_tags(t)).collect();
        if !self.config.mask_entities {
            return (lowered.join(" "), Vec::new());
        }
        let mentions = EntityRecognizer::new(&self.lexicon).recognize_tokens(&raw);
        let masked = mask_entities(&lowered, &mentions);
        (masked.join(" "), mentions)
    }
}
