//! YAML configuration file support.
//!
//! One file configures every stage of the detector plus lexicon extensions.
//! Sections that are left out take their defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "thesis review"
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: true
//!   mask_entities: true
//!   max_passes: 8
//!
//! similarity:
//!   version: 1
//!   ngram_size: 3
//!   weights:
//!     character: 0.05
//!     word: 0.25
//!     semantic: 0.45
//!     structural: 0.15
//!     entity_filtered: 0.05
//!     content_quality: 0.05
//!   low_content_min_tokens: 10
//!   low_content_min_ratio: 0.3
//!   low_content_penalty: 0.7
//!
//! matcher:
//!   version: 1
//!   similarity_threshold: 0.7
//!   strong_similarity: 0.85
//!   max_excerpts: 8
//!
//! detector:
//!   locale: "id"
//!   max_input_bytes: 5242880
//!   max_sentences: 5000
//!   use_parallel: true
//!
//! lexicon:
//!   stop_words: ["tersebut"]
//!   persons: ["wijaya kusuma"]
//!   places: ["bandung"]
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use canonical::{Lexicon, LexiconExtension, NormalizeConfig};
use matcher::MatcherConfig;
use serde::{Deserialize, Serialize};
use similarity::SimilarityConfig;
use thiserror::Error;

use crate::detector::{DetectError, Detector, DetectorConfig};
use crate::insights::Locale;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for the detector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct PlagscanConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub canonical: NormalizeConfig,

    #[serde(default)]
    pub similarity: SimilarityConfig,

    #[serde(default)]
    pub matcher: MatcherConfig,

    #[serde(default)]
    pub detector: DetectorYamlConfig,

    /// Entries added on top of the built-in lexicon.
    #[serde(default)]
    pub lexicon: LexiconExtension,
}

impl PlagscanConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PlagscanConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical
            .validate()
            .map_err(|e| section_error("canonical", e))?;
        self.similarity
            .validate()
            .map_err(|e| section_error("similarity", e))?;
        self.matcher
            .validate()
            .map_err(|e| section_error("matcher", e))?;
        self.detector_config()
            .validate()
            .map_err(|e| section_error("detector", e))?;
        Ok(())
    }

    /// Runtime detector configuration assembled from every section.
    pub fn detector_config(&self) -> DetectorConfig {
        let d = &self.detector;
        let mut similarity = self.similarity.clone();
        let mut matcher = self.matcher.clone();
        if d.use_parallel {
            similarity.use_parallel = true;
            matcher.use_parallel = true;
        }
        DetectorConfig {
            version: 1,
            normalize: self.canonical.clone(),
            similarity,
            matcher,
            locale: d.locale,
            max_input_bytes: d.max_input_bytes,
            max_sentences: d.max_sentences,
            max_entity_samples: d.max_entity_samples,
            use_parallel: d.use_parallel,
        }
    }

    /// The built-in lexicon, extended by the `lexicon` section when present.
    pub fn build_lexicon(&self) -> Result<Arc<Lexicon>, DetectError> {
        if self.lexicon.is_empty() {
            return Ok(Lexicon::shared()?);
        }
        Ok(Arc::new(Lexicon::builder().extend(&self.lexicon).build()?))
    }

    pub fn build_detector(&self) -> Result<Detector, DetectError> {
        Detector::new(self.build_lexicon()?, self.detector_config())
    }
}

impl Default for PlagscanConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            canonical: NormalizeConfig::default(),
            similarity: SimilarityConfig::default(),
            matcher: MatcherConfig::default(),
            detector: DetectorYamlConfig::default(),
            lexicon: LexiconExtension::default(),
        }
    }
}

fn section_error(section: &str, err: impl std::fmt::Display) -> ConfigLoadError {
    ConfigLoadError::Validation(format!("{section}: {err}"))
}

/// Detector-level settings that do not belong to any one stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectorYamlConfig {
    #[serde(default)]
    pub locale: Locale,

    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,

    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,

    #[serde(default = "default_max_entity_samples")]
    pub max_entity_samples: usize,

    #[serde(default)]
    pub use_parallel: bool,
}

impl Default for DetectorYamlConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            max_input_bytes: default_max_input_bytes(),
            max_sentences: default_max_sentences(),
            max_entity_samples: default_max_entity_samples(),
            use_parallel: false,
        }
    }
}

fn default_max_input_bytes() -> usize {
    DetectorConfig::default().max_input_bytes
}

fn default_max_sentences() -> usize {
    DetectorConfig::default().max_sentences
}

fn default_max_entity_samples() -> usize {
    DetectorConfig::default().max_entity_samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "thesis review"
canonical:
  version: 1
  mask_entities: false
matcher:
  max_excerpts: 4
detector:
  locale: "id"
  max_sentences: 200
"#;

        let config = PlagscanConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name.as_deref(), Some("thesis review"));
        assert!(!config.canonical.mask_entities);
        assert_eq!(config.matcher.max_excerpts, 4);

        let runtime = config.detector_config();
        assert_eq!(runtime.locale, Locale::Indonesian);
        assert_eq!(runtime.max_sentences, 200);
        assert_eq!(runtime.max_input_bytes, 5 * 1024 * 1024);
        assert_eq!(runtime.matcher.similarity_threshold, 0.7);
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1"
similarity:
  ngram_size: 4
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = PlagscanConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.similarity.ngram_size, 4);
    }

    #[test]
    fn test_missing_file() {
        let result = PlagscanConfig::from_file("/nonexistent/plagscan.yaml");
        assert!(matches!(result, Err(ConfigLoadError::FileRead(_))));
    }

    #[test]
    fn test_unsupported_version() {
        let result = PlagscanConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(
            result,
            Err(ConfigLoadError::UnsupportedVersion(ref v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_weight_validation() {
        let yaml = r#"
version: "1.0"
similarity:
  weights:
    character: 0.5
    word: 0.5
    semantic: 0.5
    structural: 0.0
    entity_filtered: 0.0
    content_quality: 0.0
"#;

        let err = PlagscanConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));
        assert!(err.to_string().contains("similarity"), "{err}");
    }

    #[test]
    fn test_detector_validation() {
        let yaml = r#"
version: "1.0"
detector:
  max_input_bytes: 0
"#;

        let err = PlagscanConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("detector"), "{err}");
        assert!(err.to_string().contains("max_input_bytes"), "{err}");
    }

    #[test]
    fn test_bad_yaml() {
        let result = PlagscanConfig::from_yaml("version: [unterminated");
        assert!(matches!(result, Err(ConfigLoadError::YamlParse(_))));
    }

    #[test]
    fn test_lexicon_extension_reaches_detector() {
        let yaml = r#"
version: "1.0"
lexicon:
  places: ["kotabaru"]
"#;

        let config = PlagscanConfig::from_yaml(yaml).unwrap();
        let detector = config.build_detector().unwrap();
        assert!(detector.lexicon().entity_kind("kotabaru").is_some());
    }

    #[test]
    fn test_default_config_builds() {
        let config = PlagscanConfig::default();
        assert_eq!(config.version, "1.0");
        config.validate().unwrap();
        assert!(config.build_detector().is_ok());
    }
}
