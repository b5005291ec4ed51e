//! The serialized result of one detection.

use canonical::EntityMention;
use matcher::ExcerptMatch;
use serde::{Deserialize, Serialize};
use similarity::SimilarityAnalysis;

use crate::contact::ContactAnalysis;
use crate::insights::AdvancedInsights;

/// Score in `[0, 1]` as a rounded percentage. Out-of-range scores are clamped.
pub fn percent(score: f64) -> u32 {
    if score.is_nan() {
        return 0;
    }
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Per-level scores as percentages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnalysis {
    pub character_level: u32,
    pub word_level: u32,
    pub semantic_level: u32,
    pub structural_level: u32,
    pub entity_filtered: u32,
    pub ngram_similarity: u32,
}

impl DetailedAnalysis {
    pub fn new(analysis: &SimilarityAnalysis, ngram_similarity: f64) -> Self {
        Self {
            character_level: percent(analysis.character_level),
            word_level: percent(analysis.word_level),
            semantic_level: percent(analysis.semantic_level),
            structural_level: percent(analysis.structural_level),
            entity_filtered: percent(analysis.entity_filtered),
            ngram_similarity: percent(ngram_similarity),
        }
    }
}

/// Entity counts per side, with a bounded sample of the mentions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntitiesDetected {
    pub target: usize,
    pub source: usize,
    pub target_entities: Vec<EntityMention>,
    pub source_entities: Vec<EntityMention>,
}

impl EntitiesDetected {
    pub fn new(target: &[EntityMention], source: &[EntityMention], max_samples: usize) -> Self {
        Self {
            target: target.len(),
            source: source.len(),
            target_entities: target.iter().take(max_samples).cloned().collect(),
            source_entities: source.iter().take(max_samples).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    /// Final score as a percentage, clamped to `0..=100`.
    pub overall_similarity: u32,
    pub detailed_analysis: DetailedAnalysis,
    pub entities_detected: EntitiesDetected,
    pub similar_content: Vec<ExcerptMatch>,
    pub contact_analysis: ContactAnalysis,
    pub advanced_insights: AdvancedInsights,
    pub source_document: String,
    /// Wall-clock milliseconds spent in the detector.
    pub processing_time: u64,
    pub algorithm: String,
    pub low_content: bool,
}

impl DetectionReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(0.125), 13);
        assert_eq!(percent(0.994), 99);
        assert_eq!(percent(1.2), 100);
        assert_eq!(percent(-0.1), 0);
        assert_eq!(percent(f64::NAN), 0);
    }

    #[test]
    fn entity_samples_are_bounded() {
        let detected = EntitiesDetected::new(&[], &[], 10);
        assert_eq!(detected.target, 0);
        assert!(detected.target_entities.is_empty());
        let json = serde_json::to_value(&detected).unwrap();
        assert!(json.get("targetEntities").is_some());
        assert!(json.get("sourceEntities").is_some());
    }
}
