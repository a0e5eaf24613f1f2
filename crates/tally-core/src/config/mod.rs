//! Per-subsystem configuration with serde defaults, loadable from TOML.

mod cache_config;
mod confidence_config;
pub mod defaults;
mod learning_config;
mod matcher_config;

pub use cache_config::CacheConfig;
pub use confidence_config::ConfidenceConfig;
pub use learning_config::LearningConfig;
pub use matcher_config::MatcherConfig;

use serde::{Deserialize, Serialize};

/// Root configuration for the whole core. Every field has a default, so an
/// empty TOML file (or no file at all) yields a working configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    pub cache: CacheConfig,
    pub matcher: MatcherConfig,
    pub confidence: ConfidenceConfig,
    pub learning: LearningConfig,
}

impl TallyConfig {
    /// Parse a TOML document, falling back to defaults for missing keys.
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = TallyConfig::from_toml("").unwrap();
        assert_eq!(config.matcher.threshold, 0.8);
        assert_eq!(config.learning.creation_threshold, 3);
    }

    #[test]
    fn partial_toml_overrides_one_section() {
        let config = TallyConfig::from_toml("[matcher]\nthreshold = 0.9\n").unwrap();
        assert_eq!(config.matcher.threshold, 0.9);
        // Untouched sections keep defaults.
        assert_eq!(config.cache.local_ttl_secs, 300);
    }
}
