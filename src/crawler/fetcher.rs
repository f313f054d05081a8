//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client (certificate validation disabled)
//! - One bounded-timeout GET per URL, no retries
//! - Classifying the outcome into something the engine can act on

use crate::config::CrawlConfig;
use crate::crawler::classifier::is_textual;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Why a fetch produced nothing to extract from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Connection refused, DNS failure, timeout, or the body could not be read
    NetworkError,

    /// HTTP status other than 200
    NonSuccessStatus,

    /// Body is not valid UTF-8
    DecodeError,

    /// Content-Type is not textual
    UnsupportedContentType,
}

impl SkipReason {
    /// Returns true if the server answered 200, so the URL counts as visited
    ///
    /// `NetworkError` and `NonSuccessStatus` leave the URL unvisited, which
    /// lets the same URL be retried if it is discovered again at a later depth.
    pub fn marks_visited(&self) -> bool {
        matches!(self, Self::DecodeError | Self::UnsupportedContentType)
    }

    /// Returns the name used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::NonSuccessStatus => "non_success_status",
            Self::DecodeError => "decode_error",
            Self::UnsupportedContentType => "unsupported_content_type",
        }
    }

    /// Returns all skip reasons
    pub fn all() -> [Self; 4] {
        [
            Self::NetworkError,
            Self::NonSuccessStatus,
            Self::DecodeError,
            Self::UnsupportedContentType,
        ]
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// HTTP 200 with a textual Content-Type and a UTF-8 body
    Fetched {
        /// Content-Type header value
        content_type: String,
        /// Decoded page body
        body: String,
    },

    /// Nothing to extract
    Skipped {
        /// Skip category
        reason: SkipReason,
        /// Human readable cause (status code, transport error, content type)
        detail: String,
    },
}

impl FetchResult {
    fn skipped(reason: SkipReason, detail: impl Into<String>) -> Self {
        Self::Skipped {
            reason,
            detail: detail.into(),
        }
    }

    /// Returns true if the URL should be recorded as visited
    pub fn marks_visited(&self) -> bool {
        match self {
            Self::Fetched { .. } => true,
            Self::Skipped { reason, .. } => reason.marks_visited(),
        }
    }
}

/// Builds an HTTP client with the crawler's configuration
///
/// Certificate verification is disabled so that self-signed and
/// misconfigured hosts can still be harvested. Redirects follow reqwest's
/// default policy (up to 10 hops).
///
/// # Example
///
/// ```no_run
/// use paexkey::config::CrawlConfig;
/// use paexkey::crawler::build_http_client;
/// use url::Url;
///
/// let config = CrawlConfig::new(Url::parse("https://example.com/").unwrap());
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &CrawlConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout)
        .danger_accept_invalid_certs(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs single-shot GETs on behalf of the worker pool
///
/// Cheap to clone: the underlying client shares its connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    timeout: Duration,
    verbose: bool,
}

impl Fetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(
            build_http_client(config)?,
            config.request_timeout,
            config.verbose,
        ))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, timeout: Duration, verbose: bool) -> Self {
        Self {
            client,
            timeout,
            verbose,
        }
    }

    /// Fetches a URL and classifies the response
    ///
    /// # Request Flow
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Transport error / timeout | `Skipped(NetworkError)` |
    /// | Status != 200 | `Skipped(NonSuccessStatus)` |
    /// | Content-Type not textual | `Skipped(UnsupportedContentType)`, body not read |
    /// | Body read fails | `Skipped(NetworkError)` |
    /// | Body not UTF-8 | `Skipped(DecodeError)` |
    /// | Otherwise | `Fetched` |
    ///
    /// Never returns an error; every failure is folded into the result.
    pub async fn fetch(&self, url: &Url) -> FetchResult {
        let request = self.client.get(url.clone()).timeout(self.timeout);
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return self.network_error(url, &e),
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!("{} returned HTTP {}", url, status.as_u16());
            return FetchResult::skipped(
                SkipReason::NonSuccessStatus,
                format!("HTTP {}", status.as_u16()),
            );
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_textual(&content_type) {
            tracing::debug!("{} is not textual ({:?})", url, content_type);
            return FetchResult::skipped(SkipReason::UnsupportedContentType, content_type);
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return self.network_error(url, &e),
        };

        match String::from_utf8(bytes.to_vec()) {
            Ok(body) => FetchResult::Fetched { content_type, body },
            Err(e) => {
                tracing::debug!("{} body is not valid UTF-8: {}", url, e);
                FetchResult::skipped(SkipReason::DecodeError, e.to_string())
            }
        }
    }

    fn network_error(&self, url: &Url, error: &reqwest::Error) -> FetchResult {
        let detail = if error.is_timeout() {
            format!("Request timeout after {:?}", self.timeout)
        } else {
            error.to_string()
        };

        if self.verbose {
            tracing::warn!("Unable to retrieve {} - {}", url, detail);
        } else {
            tracing::debug!("Unable to retrieve {} - {}", url, detail);
        }

        FetchResult::skipped(SkipReason::NetworkError, detail)
    }
}
