// src/crawl/page.rs
// =============================================================================
// This module crawls a single page.
//
// Flow:
//   FETCHING --failure--> error returned to the caller (no retry)
//      |
//      +--> status not 2xx          --> CrawlError::HttpStatus
//      +--> Content-Type not HTML   --> Ok(None)  (a skip, not an error)
//      +--> otherwise read the body, extract its links --> Ok(Some(page))
//
// The configured timeout is one deadline for the whole crawl: a server that
// sends headers and then stalls the body still ends in CrawlError::Timeout.
//
// Nothing is shared between calls, so any number of crawls can run at once.
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info};

use super::fetch::fetch_with_timeout;
use super::links::extract_links_with_failures;
use crate::error::CrawlError;

/// Deadline for fetching a page when no other is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for a Crawler
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// How long to wait for the response before giving up
    pub timeout: Duration,
    /// Value of the User-Agent header
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("page-crawler/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// An HTML page that was fetched successfully
#[derive(Debug, Clone, Serialize)]
pub struct CrawledPage {
    /// The URL that was requested
    pub url: String,
    /// HTTP status code (always 2xx here)
    pub status: u16,
    /// The Content-Type header as sent by the server
    pub content_type: String,
    /// Every link found on the page, in document order
    pub links: Vec<String>,
    /// Raw HTML
    pub body: String,
}

/// Crawls pages with one shared HTTP client
#[derive(Debug, Clone)]
pub struct Crawler {
    client: Client,
    config: CrawlConfig,
}

impl Crawler {
    /// Builds a crawler. Fails only if the HTTP client can't be constructed.
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        // No client-wide timeout: the deadline is enforced per crawl
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(CrawlError::Client)?;

        Ok(Self { client, config })
    }

    // Fetches one page and extracts its links
    //
    // Returns:
    //   Ok(Some(page)) = HTML page
    //   Ok(None)       = not HTML (or no Content-Type), deliberately skipped
    //   Err(e)         = invalid URL, timeout, network error or non-2xx status
    pub async fn crawl(&self, url: &str) -> Result<Option<CrawledPage>, CrawlError> {
        info!("Crawling {}...", url);

        let result = self.crawl_inner(url).await;
        if let Err(e) = &result {
            error!(kind = e.kind(), "Failed to crawl {}: {}", url, e);
        }
        result
    }

    async fn crawl_inner(&self, url: &str) -> Result<Option<CrawledPage>, CrawlError> {
        // One deadline for the whole crawl: response head AND body
        let timeout = self.config.timeout;
        let deadline = Instant::now() + timeout;

        let response = fetch_with_timeout(&self.client, url, timeout).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let content_type = match content_type {
            Some(ct) if is_html(&ct) => ct,
            other => {
                info!(
                    "Got non-HTML response: {}",
                    other.as_deref().unwrap_or("<no content-type>")
                );
                return Ok(None);
            }
        };

        let remaining = deadline.saturating_duration_since(Instant::now());
        let body = match tokio::time::timeout(remaining, response.text()).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => return Err(CrawlError::from_reqwest(url, timeout, e)),
            Err(_elapsed) => {
                return Err(CrawlError::Timeout {
                    url: url.to_string(),
                    timeout,
                })
            }
        };

        let extracted = extract_links_with_failures(&body, url);
        info!(
            links = extracted.links.len(),
            skipped = extracted.failures.len(),
            "Extracted links from {}",
            url
        );

        Ok(Some(CrawledPage {
            url: url.to_string(),
            status: status.as_u16(),
            content_type,
            links: extracted.links,
            body,
        }))
    }
}

// Fetches `url` with the default 10 second deadline
//
// Returns the HTML body, None for non-HTML pages, or the crawl error.
// The links are extracted but not returned; use Crawler::crawl for them.
pub async fn crawl_page(url: &str) -> Result<Option<String>, CrawlError> {
    let crawler = Crawler::new(CrawlConfig::default())?;

    Ok(crawler.crawl(url).await?.map(|page| page.body))
}

// "text/html", "text/html; charset=utf-8", "Text/HTML" ...
fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"<html><body>
        <a href="/about">About</a>
        <a href="https://other.example/x">Other</a>
        <a href="not a url">Broken</a>
    </body></html>"#;

    async fn html_server(route: &str, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/html; charset=utf-8")
                    .set_body_bytes(body.as_bytes()),
            )
            .mount(&server)
            .await;
        server
    }

    fn crawler_with_timeout(timeout: Duration) -> Crawler {
        Crawler::new(CrawlConfig {
            timeout,
            ..CrawlConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("Text/HTML"));
        assert!(!is_html("application/json"));
        assert!(!is_html("text/plain"));
    }

    #[test]
    fn test_default_config() {
        let config = CrawlConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("page-crawler/"));
    }

    #[tokio::test]
    async fn test_crawl_page_returns_html_body() {
        let server = html_server("/", PAGE).await;

        let body = crawl_page(&server.uri()).await.unwrap();
        assert_eq!(body.as_deref(), Some(PAGE));
    }

    #[tokio::test]
    async fn test_crawl_collects_links_relative_to_request_url() {
        let server = html_server("/", PAGE).await;
        let crawler = crawler_with_timeout(DEFAULT_TIMEOUT);

        let page = crawler.crawl(&server.uri()).await.unwrap().unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(page.content_type, "text/html; charset=utf-8");
        assert_eq!(
            page.links,
            vec![
                format!("{}/about", server.uri()),
                "https://other.example/x".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_json_response_is_skipped_without_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "application/json")
                    .set_body_bytes(br#"{"ok":true}"#.as_slice()),
            )
            .mount(&server)
            .await;

        let url = format!("{}/data", server.uri());
        let result = crawl_page(&url).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"<a href=\"/x\">x</a>".as_slice()))
            .mount(&server)
            .await;

        let result = crawl_page(&server.uri()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_not_found_is_http_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).insert_header("Content-Type", "text/html"),
            )
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        match crawl_page(&url).await {
            Err(CrawlError::HttpStatus { status, url: failed }) => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("Expected HttpStatus 404, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_page_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/html")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let crawler = crawler_with_timeout(Duration::from_millis(200));
        let result = crawler.crawl(&server.uri()).await;
        assert!(matches!(result, Err(CrawlError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_timeout_does_not_cancel_sibling_crawl() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/html")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fast"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/html")
                    .set_body_bytes(b"<p>fast</p>".as_slice())
                    .set_delay(Duration::from_millis(400)),
            )
            .mount(&server)
            .await;

        let slow = crawler_with_timeout(Duration::from_millis(100));
        let fast = crawler_with_timeout(Duration::from_secs(5));
        let slow_url = format!("{}/slow", server.uri());
        let fast_url = format!("{}/fast", server.uri());

        let started = Instant::now();
        let (slow_result, fast_result) = join(slow.crawl(&slow_url), fast.crawl(&fast_url)).await;

        assert!(matches!(slow_result, Err(CrawlError::Timeout { .. })));
        let page = fast_result.unwrap().unwrap();
        assert_eq!(page.body, "<p>fast</p>");
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_stalled_body_times_out() {
        // Headers promise 100 bytes, then the server sends 2 and goes quiet
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 100\r\n\r\n<p",
                )
                .await
                .unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let crawler = crawler_with_timeout(Duration::from_millis(300));
        let url = format!("http://{}/", addr);
        let started = Instant::now();
        let result = crawler.crawl(&url).await;

        match result {
            Err(CrawlError::Timeout { timeout, .. }) => {
                assert_eq!(timeout, Duration::from_millis(300));
            }
            other => panic!("Expected Timeout, got: {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn test_bad_user_agent_is_client_error() {
        let result = Crawler::new(CrawlConfig {
            user_agent: "bad\nagent".to_string(),
            ..CrawlConfig::default()
        });
        assert!(matches!(result, Err(CrawlError::Client(_))));
    }
}
