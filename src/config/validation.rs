use crate::config::types::{CrawlConfig, OutputConfig, Settings};
use crate::url::parse_seed;
use crate::ConfigError;
use std::time::Duration;
use url::Url;

/// Upper bound on concurrent fetch workers
pub const MAX_THREADS: usize = 256;

/// Validates the entire configuration
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    validate_crawler_config(&settings.crawler)?;
    validate_output_config(&settings.output)?;
    Ok(())
}

/// Parses the seed URL, mapping URL errors into configuration errors
pub fn validate_seed(seed: &str) -> Result<Url, ConfigError> {
    parse_seed(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.workers < 1 || config.workers > MAX_THREADS {
        return Err(ConfigError::Validation(format!(
            "threads must be between 1 and {}, got {}",
            MAX_THREADS, config.workers
        )));
    }

    if config.request_timeout < Duration::from_secs(1) {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1s, got {:?}",
            config.request_timeout
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if let Some(keywords) = &config.keywords {
        if keywords.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "keywords path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
