//! Page fetching behind a capability trait so the pipeline can run on fixed pages

use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::data_fetcher::http_client::create_http_client_with_timeout;
use crate::error::AppError;

/// Something that can return the HTML of a page.
///
/// Implemented over HTTP by [`HttpPageSource`]; tests use a fixed map of pages.
pub trait PageSource {
    /// Fetches the page at `url`, giving up after `timeout`.
    fn fetch_page(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Fetches pages over HTTP with a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a source whose client uses the configured roster page timeout
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client))
    }
}

impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &str, timeout: Duration) -> Result<String, AppError> {
        fetch_page(&self.client, url, timeout).await
    }
}

/// Fetches a page body as text, mapping failures to specific error variants.
///
/// Requests are not retried. Failures are only logged at debug level here;
/// callers decide how serious a failed page is.
///
/// # Arguments
/// * `client` - HTTP client for making requests
/// * `url` - URL to fetch
/// * `timeout` - Timeout for this request
///
/// # Returns
/// * `Result<String, AppError>` - Response body or error
#[instrument(skip(client))]
pub async fn fetch_page(client: &Client, url: &str, timeout: Duration) -> Result<String, AppError> {
    debug!("Fetching page: {url}");

    let response = match client.get(url).timeout(timeout).send().await {
        Ok(resp) => resp,
        Err(e) => {
            debug!("Request failed for URL {}: {}", url, e);
            return if e.is_timeout() {
                Err(AppError::network_timeout(url))
            } else if e.is_connect() {
                Err(AppError::network_connection(url, e.to_string()))
            } else {
                Err(AppError::Fetch(e))
            };
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");

        debug!("HTTP {} - {} (URL: {})", status_code, reason, url);

        return Err(match status_code {
            404 => AppError::page_not_found(url),
            429 => AppError::rate_limit(reason, url),
            400..=499 => AppError::client_error(status_code, reason, url),
            502 | 503 => AppError::service_unavailable(status_code, reason, url),
            _ => AppError::server_error(status_code, reason, url),
        });
    }

    let body = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            debug!("Failed to read response text from URL {}: {}", url, e);
            return if e.is_timeout() {
                Err(AppError::network_timeout(url))
            } else {
                Err(AppError::Fetch(e))
            };
        }
    };

    debug!("Response length: {} bytes", body.len());

    if body.trim().is_empty() {
        return Err(AppError::empty_page(url));
    }

    Ok(body)
}
