//! Workspace umbrella crate for Plagscan.
//!
//! This crate stitches together normalization, similarity scoring and
//! excerpt matching so callers can compare two documents with a single
//! entry point and receive a serializable [`DetectionReport`].
//!
//! ```
//! let text = "Model klasifikasi teks dilatih memakai korpus berita daring.";
//! let report = plagscan::detect(text, text, "berita.txt").unwrap();
//!
//! assert_eq!(report.source_document, "berita.txt");
//! assert_eq!(report.detailed_analysis.word_level, 100);
//! ```

pub mod config;
pub mod contact;
pub mod detector;
pub mod insights;
pub mod metrics;
pub mod report;

pub use canonical::{
    EntityKind, EntityMention, Lexicon, LexiconBuilder, LexiconExtension, NormalizeConfig,
    Normalizer,
};
pub use matcher::{ExcerptMatch, MatcherConfig};
pub use similarity::{ScoreWeights, SimilarityAnalysis, SimilarityConfig, SIMILARITY_ALGORITHM};

pub use crate::config::{ConfigLoadError, DetectorYamlConfig, PlagscanConfig};
pub use crate::contact::{analyze_contacts, ContactAnalysis};
pub use crate::detector::{DetectError, Detector, DetectorConfig, DocumentSide};
pub use crate::insights::{
    generate_insights, AdvancedInsights, Confidence, ContentAnalysis, InsightContext,
    LevelBreakdown, Locale, SimilarityBreakdown,
};
pub use crate::metrics::{set_detect_metrics, DetectMetrics};
pub use crate::report::{percent, DetailedAnalysis, DetectionReport, EntitiesDetected};

/// Compares `target` with `source` using the built-in lexicon and default
/// configuration.
pub fn detect(
    target: &str,
    source: &str,
    source_label: &str,
) -> Result<DetectionReport, DetectError> {
    Detector::with_defaults()?.detect(target, source, source_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, RwLock};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingMetrics {
        events: RwLock<Vec<&'static str>>,
    }

    impl CountingMetrics {
        fn snapshot(&self) -> Vec<&'static str> {
            self.events.read().unwrap().clone()
        }
    }

    impl DetectMetrics for CountingMetrics {
        fn record_detect(&self, _latency: Duration, result: Result<(), &DetectError>) {
            let label = match result {
                Ok(()) => "detect_ok",
                Err(DetectError::InvalidUtf8 { .. }) => "detect_utf8_err",
                Err(_) => "detect_err",
            };
            self.events.write().unwrap().push(label);
        }
    }

    #[test]
    fn metrics_recorder_tracks_detect_outcome() {
        let metrics = Arc::new(CountingMetrics::default());
        set_detect_metrics(Some(metrics.clone()));

        let detector = Detector::with_defaults().unwrap();
        assert!(detector.detect("satu dua", "tiga empat", "a").is_ok());
        assert!(detector.detect_bytes(&[0xc3], b"ok", "b").is_err());

        let events = metrics.snapshot();
        assert!(events.contains(&"detect_ok"));
        assert!(events.contains(&"detect_utf8_err"));

        set_detect_metrics(None);
    }

    #[test]
    fn free_function_uses_defaults() {
        let report = detect("", "", "kosong").unwrap();
        assert_eq!(report.overall_similarity, 0);
        assert!(report.low_content);
        assert!(report.similar_content.is_empty());
        assert_eq!(report.algorithm, SIMILARITY_ALGORITHM);
    }
}
