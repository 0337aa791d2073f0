// src/error.rs
// =============================================================================
// Error types for crawling a single page.
//
// Every failure the crawler can produce is one variant of CrawlError:
// - InvalidUrl: the string could not be parsed (or uses a scheme we can't fetch)
// - Timeout: no response arrived before the deadline
// - Network: connection-level failure (DNS, refused, TLS, reset...)
// - HttpStatus: the server answered, but not with a 2xx status
// - Client: the HTTP client couldn't be set up, no request was made
//
// A non-HTML page is NOT an error, so it has no variant here.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[source]: keeps the underlying reqwest error in the error chain
// =============================================================================

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The URL (or href) could not be turned into an absolute http(s) URL
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request did not complete before the deadline
    #[error("request to {url} timed out after {}ms", .timeout.as_millis())]
    Timeout { url: String, timeout: Duration },

    /// Transport-level failure before any HTTP status was received
    #[error("network error while fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status code
    #[error("HTTP error! status: {status} ({url})")]
    HttpStatus { url: String, status: u16 },

    /// The HTTP client itself could not be built (bad User-Agent, TLS setup...)
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl CrawlError {
    /// Builds an InvalidUrl error from anything that displays (usually url::ParseError)
    pub fn invalid_url(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Maps a reqwest error onto our kinds.
    ///
    /// reqwest can time out on its own (e.g. a client-wide timeout), so a
    /// timeout reported by reqwest is still a Timeout and never a Network error.
    pub fn from_reqwest(url: &str, timeout: Duration, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            Self::Network {
                url: url.to_string(),
                source: error,
            }
        }
    }

    /// Short, stable name of the error kind (used in JSON output and logs)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "invalid_url",
            Self::Timeout { .. } => "timeout",
            Self::Network { .. } => "network",
            Self::HttpStatus { .. } => "http_status",
            Self::Client(_) => "client",
        }
    }
}
