// src/crawl/fetch.rs
// =============================================================================
// This module performs one HTTP GET with a hard deadline.
//
// How the deadline works:
// - tokio::time::timeout races the request future against a timer
// - if the timer wins, the request future is dropped, which cancels the
//   in-flight request (only this one, sibling fetches are untouched)
// - if the request wins, the timer is dropped
//
// So exactly one of {response, Timeout, Network} comes out of a call.
// The deadline covers getting the response head. Callers that read the
// body bound it themselves (see page.rs).
// =============================================================================

use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::CrawlError;

// Fetches a URL, giving up after `timeout`
//
// Parameters:
//   client: shared reqwest client (connection pooling)
//   url: absolute URL to GET
//   timeout: how long to wait for a response before cancelling
//
// Returns: the response (any status code), or an error
//   InvalidUrl: url doesn't parse, isn't http/https or has no host
//   Timeout: no response within `timeout`
//   Network: connection-level failure
pub async fn fetch_with_timeout(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<Response, CrawlError> {
    // Validate up front so a bad URL is an InvalidUrl, not a reqwest builder error
    let parsed = parse_fetchable_url(url, url)?;

    debug!(url, timeout_ms = timeout.as_millis() as u64, "Sending request");

    match tokio::time::timeout(timeout, client.get(parsed).send()).await {
        Ok(Ok(response)) => {
            debug!(url, status = response.status().as_u16(), "Got response");
            Ok(response)
        }
        Ok(Err(e)) => Err(CrawlError::from_reqwest(url, timeout, e)),
        Err(_elapsed) => Err(CrawlError::Timeout {
            url: url.to_string(),
            timeout,
        }),
    }
}

// Parses `candidate` and checks it is something we can GET
//
// Parameters:
//   candidate: the string to parse
//   reported_as: what to put in the error (the href, when resolving links)
//
// Returns: the parsed URL, or InvalidUrl if it doesn't parse, isn't
// http/https (mailto:, ftp:, file:, javascript: ...) or has no host
pub(super) fn parse_fetchable_url(candidate: &str, reported_as: &str) -> Result<Url, CrawlError> {
    let url = Url::parse(candidate).map_err(|e| CrawlError::invalid_url(reported_as, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(CrawlError::invalid_url(
            reported_as,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(CrawlError::invalid_url(reported_as, "URL has no host"));
    }

    Ok(url)
}
