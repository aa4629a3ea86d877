//! HTTP client with bounded retry and exponential backoff.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use super::error::{FetchError, TransientError};

/// HTTP client sending a fixed identifying `User-Agent` header.
///
/// Any network-level error or non-2xx status counts as a transient
/// failure and is retried with a doubling backoff delay until the
/// attempt budget is spent.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    retry_attempts: u32,
    retry_base_delay: Duration,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(
        user_agent: &str,
        timeout: Duration,
        retry_attempts: u32,
        retry_base_delay: Duration,
    ) -> Self {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            retry_attempts: retry_attempts.max(1),
            retry_base_delay,
        }
    }

    /// Fetch page content as text, retrying transient failures.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.fetch_once(url).await {
                Ok(body) => {
                    if attempt > 1 {
                        debug!("fetched {} on attempt {}", url, attempt);
                    }
                    return Ok(body);
                }
                Err(e) if attempt < self.retry_attempts => {
                    let delay = self.retry_base_delay * 2u32.pow(attempt - 1);
                    warn!(
                        "fetch of {} failed (attempt {}/{}), retrying in {:?}: {}",
                        url, attempt, self.retry_attempts, delay, e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    return Err(FetchError::Exhausted {
                        url: url.to_string(),
                        attempts: attempt,
                        source: e,
                    });
                }
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, TransientError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransientError::Status(status));
        }
        Ok(response.text().await?)
    }
}
