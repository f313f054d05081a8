use crate::config::types::{
    CrawlConfig, FileConfig, OutputConfig, Overrides, Settings, DEFAULT_MAX_DEPTH,
    DEFAULT_OUTPUT_DIR, DEFAULT_THREADS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::config::validation::{validate, validate_seed};
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Loads and parses a configuration file from the given path
///
/// Only syntax and key names are checked here; value ranges are validated
/// once the file has been merged with command-line flags.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use paexkey::config::load_file_config;
///
/// let file = load_file_config(Path::new("paexkey.toml")).unwrap();
/// println!("Max depth: {:?}", file.crawler.max_depth);
/// ```
pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two runs can be tied to the same configuration.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration file and returns both the config and its hash
pub fn load_file_config_with_hash(path: &Path) -> Result<(FileConfig, String), ConfigError> {
    let config = load_file_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Merges command-line flags, an optional config file and defaults
///
/// Precedence is flag, then file, then built-in default. Boolean flags can
/// only switch a setting on. The merged result is validated before it is
/// returned.
pub fn resolve_settings(
    overrides: Overrides,
    file: Option<FileConfig>,
) -> Result<Settings, ConfigError> {
    let file = file.unwrap_or_default();
    let seed_url = validate_seed(&overrides.seed_url)?;

    let crawler = CrawlConfig {
        seed_url,
        max_depth: overrides
            .max_depth
            .or(file.crawler.max_depth)
            .unwrap_or(DEFAULT_MAX_DEPTH),
        workers: overrides
            .threads
            .or(file.crawler.threads)
            .unwrap_or(DEFAULT_THREADS),
        verbose: overrides.verbose,
        request_timeout: Duration::from_secs(
            overrides
                .timeout_secs
                .or(file.crawler.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
        user_agent: file
            .crawler
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
    };

    let output = OutputConfig {
        directory: overrides
            .output_dir
            .or(file.output.directory)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        keywords: overrides.keywords.or(file.output.keywords),
        delete_input: overrides.delete_input || file.output.delete_input.unwrap_or(false),
    };

    let settings = Settings { crawler, output };
    validate(&settings)?;
    Ok(settings)
}
