use std::fmt;
use std::str::Utf8Error;
use std::sync::Arc;
use std::time::Instant;

use canonical::{split_sentences, CanonicalError, Lexicon, LexiconError, NormalizeConfig, Normalizer};
use matcher::{ExcerptMatch, ExcerptMatcher, MatchError, MatcherConfig};
use serde::{Deserialize, Serialize};
use similarity::{
    PreparedText, SimilarityAnalysis, SimilarityAnalyzer, SimilarityConfig, SimilarityError,
    SIMILARITY_ALGORITHM,
};
use thiserror::Error;
use tracing::{info, warn, Level};

use crate::contact::analyze_contacts;
use crate::insights::{generate_insights, InsightContext, Locale};
use crate::metrics::MetricsSpan;
use crate::report::{percent, DetailedAnalysis, DetectionReport, EntitiesDetected};

/// Which input a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSide {
    Target,
    Source,
}

impl fmt::Display for DocumentSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentSide::Target => "target",
            DocumentSide::Source => "source",
        })
    }
}

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("invalid detector configuration: {0}")]
    InvalidConfig(String),
    #[error("{side} document is {bytes} bytes; limit is {limit}")]
    InputTooLarge {
        side: DocumentSide,
        bytes: usize,
        limit: usize,
    },
    #[error("{side} document has {sentences} sentences; limit is {limit}")]
    TooManySentences {
        side: DocumentSide,
        sentences: usize,
        limit: usize,
    },
    #[error("{side} document is not valid UTF-8")]
    InvalidUtf8 {
        side: DocumentSide,
        #[source]
        source: Utf8Error,
    },
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
    #[error(transparent)]
    Canonical(#[from] CanonicalError),
    #[error(transparent)]
    Similarity(#[from] SimilarityError),
    #[error(transparent)]
    Match(#[from] MatchError),
}

fn decode(bytes: &[u8], side: DocumentSide) -> Result<&str, DetectError> {
    std::str::from_utf8(bytes).map_err(|source| DetectError::InvalidUtf8 { side, source })
}

/// Configuration for the whole detection pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectorConfig {
    pub version: u32,
    pub normalize: NormalizeConfig,
    pub similarity: SimilarityConfig,
    pub matcher: MatcherConfig,
    pub locale: Locale,
    /// Per-document limit on UTF-8 bytes.
    pub max_input_bytes: usize,
    /// Per-document limit on sentences.
    pub max_sentences: usize,
    /// Entity mentions echoed per side in the report.
    pub max_entity_samples: usize,
    /// Run document scoring and excerpt matching on separate rayon workers.
    pub use_parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize: NormalizeConfig::default(),
            similarity: SimilarityConfig::default(),
            matcher: MatcherConfig::default(),
            locale: Locale::English,
            max_input_bytes: 5 * 1024 * 1024,
            max_sentences: 5_000,
            max_entity_samples: 10,
            use_parallel: false,
        }
    }
}

impl DetectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_limits(mut self, max_input_bytes: usize, max_sentences: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self.max_sentences = max_sentences;
        self
    }

    /// Turns on every parallel path: detector, semantic metric and matcher.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self.similarity.use_parallel = use_parallel;
        self.matcher.use_parallel = use_parallel;
        self
    }

    pub fn validate(&self) -> Result<(), DetectError> {
        if self.version == 0 {
            return Err(DetectError::InvalidConfig(
                "version must be >= 1".to_string(),
            ));
        }
        if self.max_input_bytes == 0 {
            return Err(DetectError::InvalidConfig(
                "max_input_bytes must be > 0".to_string(),
            ));
        }
        if self.max_sentences == 0 {
            return Err(DetectError::InvalidConfig(
                "max_sentences must be > 0".to_string(),
            ));
        }
        self.normalize.validate()?;
        self.similarity.validate()?;
        self.matcher.validate()?;
        Ok(())
    }
}

/// Compares a target document with a source document and builds a
/// [`DetectionReport`].
///
/// A detector is immutable once built and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Detector {
    analyzer: SimilarityAnalyzer,
    matcher: ExcerptMatcher,
    config: DetectorConfig,
}

impl Detector {
    pub fn new(lexicon: Arc<Lexicon>, config: DetectorConfig) -> Result<Self, DetectError> {
        config.validate()?;
        let normalizer = Normalizer::new(lexicon, config.normalize.clone())?;
        let analyzer = SimilarityAnalyzer::new(normalizer.clone(), config.similarity.clone())?;
        let matcher = ExcerptMatcher::new(normalizer, config.matcher.clone())?;
        Ok(Self {
            analyzer,
            matcher,
            config,
        })
    }

    /// Detector over the built-in lexicon with default configuration.
    pub fn with_defaults() -> Result<Self, DetectError> {
        Self::new(Lexicon::shared()?, DetectorConfig::default())
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        self.analyzer.lexicon()
    }

    /// Runs the full analysis. Fails only on input that exceeds the
    /// configured limits.
    pub fn detect(
        &self,
        target: &str,
        source: &str,
        source_label: &str,
    ) -> Result<DetectionReport, DetectError> {
        let metrics = MetricsSpan::start();
        let start = Instant::now();

        let span = tracing::span!(
            Level::INFO,
            "plagscan.detect",
            source = %source_label,
            target_bytes = target.len(),
            source_bytes = source.len()
        );
        let _guard = span.enter();

        let result = self.detect_inner(target, source, source_label, start);
        let elapsed_micros = start.elapsed().as_micros();
        match &result {
            Ok(report) => info!(
                overall = report.overall_similarity,
                excerpts = report.similar_content.len(),
                low_content = report.low_content,
                elapsed_micros,
                "detect_success"
            ),
            Err(err) => warn!(error = %err, elapsed_micros, "detect_failure"),
        }

        if let Some(metrics) = metrics {
            metrics.record_detect(result.as_ref().map(|_| ()));
        }
        result
    }

    /// Like [`Detector::detect`] for undecoded input. Bytes must be UTF-8.
    pub fn detect_bytes(
        &self,
        target: &[u8],
        source: &[u8],
        source_label: &str,
    ) -> Result<DetectionReport, DetectError> {
        let target = match decode(target, DocumentSide::Target) {
            Ok(text) => text,
            Err(err) => return self.reject(err),
        };
        let source = match decode(source, DocumentSide::Source) {
            Ok(text) => text,
            Err(err) => return self.reject(err),
        };
        self.detect(target, source, source_label)
    }

    fn reject(&self, err: DetectError) -> Result<DetectionReport, DetectError> {
        warn!(error = %err, "detect_failure");
        if let Some(metrics) = MetricsSpan::start() {
            metrics.record_detect(Err(&err));
        }
        Err(err)
    }

    fn check_limits(&self, text: &str, side: DocumentSide) -> Result<(), DetectError> {
        if text.len() > self.config.max_input_bytes {
            return Err(DetectError::InputTooLarge {
                side,
                bytes: text.len(),
                limit: self.config.max_input_bytes,
            });
        }
        let sentences = split_sentences(text).len();
        if sentences > self.config.max_sentences {
            return Err(DetectError::TooManySentences {
                side,
                sentences,
                limit: self.config.max_sentences,
            });
        }
        Ok(())
    }

    fn detect_inner(
        &self,
        target: &str,
        source: &str,
        source_label: &str,
        start: Instant,
    ) -> Result<DetectionReport, DetectError> {
        self.check_limits(target, DocumentSide::Target)?;
        self.check_limits(source, DocumentSide::Source)?;

        let score = || self.score(target, source);
        let excerpts = || self.matcher.find_similar_excerpts(target, source);
        let ((prepared_target, prepared_source, analysis, ngram), excerpts) =
            if self.config.use_parallel {
                rayon::join(score, excerpts)
            } else {
                (score(), excerpts())
            };

        let locale = self.config.locale;
        let contacts = analyze_contacts(target, source, self.lexicon(), locale);
        let insights = generate_insights(&InsightContext {
            analysis: &analysis,
            excerpts: &excerpts,
            contacts: &contacts,
            target_entities: prepared_target.mentions.len(),
            source_label,
            locale,
        });

        Ok(DetectionReport {
            overall_similarity: percent(analysis.final_score),
            detailed_analysis: DetailedAnalysis::new(&analysis, ngram),
            entities_detected: EntitiesDetected::new(
                &prepared_target.mentions,
                &prepared_source.mentions,
                self.config.max_entity_samples,
            ),
            similar_content: excerpts,
            contact_analysis: contacts,
            advanced_insights: insights,
            source_document: source_label.to_string(),
            processing_time: start.elapsed().as_millis() as u64,
            algorithm: SIMILARITY_ALGORITHM.to_string(),
            low_content: analysis.low_content,
        })
    }

    fn score<'t>(
        &self,
        target: &'t str,
        source: &'t str,
    ) -> (PreparedText<'t>, PreparedText<'t>, SimilarityAnalysis, f64) {
        let target = self.analyzer.prepare(target);
        let source = self.analyzer.prepare(source);
        let analysis = self.analyzer.analyze_prepared(&target, &source);
        let ngram = self.analyzer.ngram_similarity(&target, &source);
        (target, source, analysis, ngram)
    }

    /// Excerpts only, without document-level scoring.
    pub fn similar_excerpts(&self, target: &str, source: &str) -> Vec<ExcerptMatch> {
        self.matcher.find_similar_excerpts(target, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector(config: DetectorConfig) -> Detector {
        Detector::new(Arc::new(Lexicon::builtin().unwrap()), config).unwrap()
    }

    const TEXT: &str = "Penelitian ini membangun model klasifikasi teks otomatis untuk dokumen \
        berita berbahasa Indonesia. Model tersebut memanfaatkan representasi kata berbobot \
        serta jaringan saraf konvolusional yang dilatih ulang memakai korpus besar.";

    #[test]
    fn report_fields_are_populated() {
        let report = detector(DetectorConfig::default())
            .detect(TEXT, TEXT, "jurnal.pdf")
            .unwrap();
        assert_eq!(report.source_document, "jurnal.pdf");
        assert_eq!(report.algorithm, SIMILARITY_ALGORITHM);
        assert_eq!(report.detailed_analysis.word_level, 100);
        assert_eq!(report.detailed_analysis.character_level, 100);
        assert_eq!(report.detailed_analysis.ngram_similarity, 100);
        assert!(report.overall_similarity <= 100);
        assert!(!report.advanced_insights.recommendations.is_empty());
    }

    #[test]
    fn parallel_detector_matches_sequential() {
        let sequential = detector(DetectorConfig::default())
            .detect(TEXT, TEXT, "a")
            .unwrap();
        let parallel = detector(DetectorConfig::default().with_parallel(true))
            .detect(TEXT, TEXT, "a")
            .unwrap();
        assert_eq!(sequential.overall_similarity, parallel.overall_similarity);
        assert_eq!(sequential.detailed_analysis, parallel.detailed_analysis);
        assert_eq!(sequential.similar_content, parallel.similar_content);
        assert_eq!(sequential.advanced_insights, parallel.advanced_insights);
    }

    #[test]
    fn oversized_input_is_rejected() {
        let d = detector(DetectorConfig::default().with_limits(16, 100));
        let err = d.detect(TEXT, "pendek", "x").unwrap_err();
        assert!(matches!(
            err,
            DetectError::InputTooLarge {
                side: DocumentSide::Target,
                limit: 16,
                ..
            }
        ));
    }

    #[test]
    fn sentence_limit_is_enforced() {
        let d = detector(DetectorConfig::default().with_limits(1024, 1));
        let err = d.detect("satu", "satu. dua. tiga.", "x").unwrap_err();
        assert!(matches!(
            err,
            DetectError::TooManySentences {
                side: DocumentSide::Source,
                sentences: 3,
                limit: 1
            }
        ));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let d = detector(DetectorConfig::default());
        let err = d.detect_bytes(b"ok", &[0xff, 0xfe], "x").unwrap_err();
        assert!(matches!(
            err,
            DetectError::InvalidUtf8 {
                side: DocumentSide::Source,
                ..
            }
        ));
        assert_eq!(err.to_string(), "source document is not valid UTF-8");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DetectorConfig {
            max_sentences: 0,
            ..DetectorConfig::default()
        };
        assert!(matches!(
            Detector::new(Arc::new(Lexicon::builtin().unwrap()), config),
            Err(DetectError::InvalidConfig(_))
        ));

        let config = DetectorConfig {
            matcher: MatcherConfig::default().with_max_excerpts(0),
            ..DetectorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DetectError::Match(MatchError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: DetectorConfig =
            serde_json::from_str(r#"{"locale":"id","max_sentences":10}"#).unwrap();
        assert_eq!(config.locale, Locale::Indonesian);
        assert_eq!(config.max_sentences, 10);
        assert_eq!(config.max_input_bytes, 5 * 1024 * 1024);
    }
}
