use serde::{Deserialize, Serialize};

use crate::matcher::MatcherConfig;
use crate::orchestrator::BatchConfig;
use crate::prices::PriceFormat;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub prices: PriceFormat,
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Pricing source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Root URL of the pricing site.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// How listing pages are located.
    #[serde(default)]
    pub query_mode: QueryMode,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            query_mode: QueryMode::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.pricecharting.com".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// How a catalog entry is turned into a listing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Search the source and resolve the best candidate.
    #[default]
    Search,
    /// Build the listing URL directly from slugged system and name.
    Direct,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchFallback;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.base_url, "https://www.pricecharting.com");
        assert_eq!(config.source.timeout_secs, 30);
        assert_eq!(config.source.query_mode, QueryMode::Search);
        assert_eq!(config.matcher.threshold, 0.6);
        assert_eq!(config.prices.currency_symbols, "$");
        assert_eq!(config.batch.max_concurrent_fetches, 8);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.source.base_url, "https://www.pricecharting.com");
        assert_eq!(config.matcher.fallback, MatchFallback::None);
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
[source]
base_url = "http://pricing.test"
timeout_secs = 5
query_mode = "direct"

[matcher]
threshold = 0.8
fallback = "first"

[prices]
currency_symbols = "€"
thousands_separator = "."
decimal_separator = ","

[batch]
max_concurrent_fetches = 2
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.source.base_url, "http://pricing.test");
        assert_eq!(config.source.timeout_secs, 5);
        assert_eq!(config.source.query_mode, QueryMode::Direct);
        assert_eq!(config.matcher.threshold, 0.8);
        assert_eq!(config.matcher.fallback, MatchFallback::First);
        assert_eq!(config.prices.decimal_separator, ',');
        assert_eq!(config.batch.max_concurrent_fetches, 2);
    }

    #[test]
    fn test_deserialize_partial_section() {
        let toml = r#"
[source]
timeout_secs = 10
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.source.timeout_secs, 10);
        assert_eq!(config.source.base_url, "https://www.pricecharting.com");
    }
}
