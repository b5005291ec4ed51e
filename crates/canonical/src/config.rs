//! Configuration for the text normalizer.
//!
//! # Versioning
//!
//! The `version` field tracks normalization behavior. Any change to the rule
//! tables or stage ordering that alters output must be accompanied by a
//! version bump, so stored scores can be traced to the normalizer that
//! produced them. Version 0 is reserved and rejected.
//!
//! # Examples
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig::default().with_max_passes(4);
//! assert!(config.validate().is_ok());
//! assert!(config.mask_entities);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for [`Normalizer`](crate::Normalizer).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Normalization behavior version. Must be >= 1.
    pub version: u32,

    /// Apply Unicode NFKC before the rule stages.
    ///
    /// Full-width digits, ligatures and compatibility forms otherwise slip
    /// past the ASCII-oriented contact and numeric patterns.
    pub normalize_unicode: bool,

    /// Run entity recognition and replace mentions with placeholder tags.
    pub mask_entities: bool,

    /// Upper bound on full five-stage passes while searching for a fixed
    /// point. Must be >= 1.
    pub max_passes: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            mask_entities: true,
            max_passes: 8,
        }
    }
}

impl NormalizeConfig {
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    pub fn with_entity_masking(mut self, enabled: bool) -> Self {
        self.mask_entities = enabled;
        self
    }

    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = passes;
        self
    }

    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "version must be >= 1 (0 is reserved)".into(),
            ));
        }
        if self.max_passes == 0 {
            return Err(CanonicalError::InvalidConfig(
                "max_passes must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
