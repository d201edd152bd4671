use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - base_url is an http(s) URL
/// - timeout and fetch concurrency are nonzero
/// - matcher threshold is within [0.0, 1.0]
/// - price separators are distinct
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if !config.source.base_url.starts_with("http://")
        && !config.source.base_url.starts_with("https://")
    {
        return Err(ConfigError::ValidationError(
            "source.base_url must be an http(s) URL".to_string(),
        ));
    }

    if config.source.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "source.timeout_secs cannot be 0".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&config.matcher.threshold) {
        return Err(ConfigError::ValidationError(
            "matcher.threshold must be between 0.0 and 1.0".to_string(),
        ));
    }

    if config.prices.thousands_separator == config.prices.decimal_separator {
        return Err(ConfigError::ValidationError(
            "prices.thousands_separator and prices.decimal_separator must differ".to_string(),
        ));
    }

    if config.batch.max_concurrent_fetches == 0 {
        return Err(ConfigError::ValidationError(
            "batch.max_concurrent_fetches cannot be 0".to_string(),
        ));
    }

    Ok(())
}
