//! Page fetching capability
//!
//! This module defines the boundary between the discovery logic and whatever
//! actually retrieves pages:
//! - The `PageFetcher` trait used by the sitemap locator
//! - `HttpFetcher`, the reqwest-backed implementation used by the CLI
//! - Error classification into timeouts and transport failures

use crate::config::FetchConfig;
use crate::{FetchError, FetchResult, SeederError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;

/// Response returned by a successful fetch
///
/// "Successful" means the transport completed; `status` may still be an
/// HTTP error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub content: String,
}

impl FetchResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Capability to fetch pages, owned by the batch for the run's duration
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`, giving up after `timeout`
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult<FetchResponse>;

    /// Releases the underlying session
    ///
    /// Called exactly once at the end of a batch. The default does nothing.
    async fn close(&mut self) {}
}

/// reqwest-backed fetcher presenting a desktop browser identity
pub struct HttpFetcher {
    client: Client,
    closed: bool,
}

impl HttpFetcher {
    /// Builds the shared HTTP session
    ///
    /// # Returns
    ///
    /// * `Ok(HttpFetcher)` - Session ready for use
    /// * `Err(SeederError::CapabilityInit)` - The client could not be built
    pub fn new(config: &FetchConfig) -> Result<Self, SeederError> {
        let client = build_http_client(config)
            .map_err(|e| SeederError::CapabilityInit(e.to_string()))?;

        if !config.headless {
            tracing::warn!("HTTP fetcher has no visible mode; running headless");
        }

        tracing::info!("Fetch session initialized");
        Ok(Self {
            client,
            closed: false,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult<FetchResponse> {
        if self.closed {
            return Err(FetchError::Transport {
                url: url.to_string(),
                message: "fetch session already closed".to_string(),
            });
        }

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content = response.text().await.map_err(|e| classify_error(url, e))?;

        Ok(FetchResponse {
            final_url,
            status,
            content,
        })
    }

    async fn close(&mut self) {
        if !self.closed {
            tracing::info!("Closing fetch session");
            self.closed = true;
        }
    }
}

/// Builds an HTTP client with browser-like headers
///
/// Redirects are followed (reqwest default of 10 hops), matching what a
/// browser navigation does.
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    if let Ok(lang) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, lang);
    }
    headers.insert("dnt", HeaderValue::from_static("1"));
    headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

fn classify_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        FetchError::Transport {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}
