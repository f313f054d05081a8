use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default maximum crawl depth (link hops from the seed)
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Default number of concurrent fetch workers
pub const DEFAULT_THREADS: usize = 4;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default root directory for crawl output
pub const DEFAULT_OUTPUT_DIR: &str = "Output";

/// Default User-Agent header sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("paexkey/", env!("CARGO_PKG_VERSION"));

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub crawler: CrawlConfig,
    pub output: OutputConfig,
}

/// Crawl behavior configuration
///
/// Immutable for the lifetime of a run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// URL the crawl starts from (depth 0)
    pub seed_url: Url,

    /// Maximum depth to crawl from the seed URL
    pub max_depth: u32,

    /// Maximum number of concurrent fetch+extract units
    pub workers: usize,

    /// Report network failures as they happen
    pub verbose: bool,

    /// Hard timeout for each individual request
    pub request_timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,
}

impl CrawlConfig {
    /// Creates a configuration for `seed_url` with every other field at its default
    pub fn new(seed_url: Url) -> Self {
        Self {
            seed_url,
            max_depth: DEFAULT_MAX_DEPTH,
            workers: DEFAULT_THREADS,
            verbose: false,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Root output directory; files land in `<directory>/<domain>/`
    pub directory: PathBuf,

    /// Newline-delimited keyword file used to produce `<domain>_filtered.txt`
    pub keywords: Option<PathBuf>,

    /// Remove `<domain>.txt` once the filtered file has been written
    pub delete_input: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            keywords: None,
            delete_input: false,
        }
    }
}

/// Values given on the command line
///
/// `None` means the flag was not passed and the file or default value applies.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed_url: String,
    pub max_depth: Option<u32>,
    pub threads: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub verbose: bool,
    pub output_dir: Option<PathBuf>,
    pub keywords: Option<PathBuf>,
    pub delete_input: bool,
}

/// On-disk TOML configuration; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub crawler: CrawlerSection,
    #[serde(default)]
    pub output: OutputSection,
}

/// `[crawler]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlerSection {
    #[serde(rename = "max-depth")]
    pub max_depth: Option<u32>,

    pub threads: Option<usize>,

    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,
}

/// `[output]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub directory: Option<PathBuf>,

    pub keywords: Option<PathBuf>,

    #[serde(rename = "delete-input")]
    pub delete_input: Option<bool>,
}
