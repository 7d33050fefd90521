//! HTTP page fetcher with retries and safe structured logging.
//!
//! - One job: GET a URL and hand back the page text
//! - Retries network errors, 429, and 5xx with exponential backoff and
//!   `Retry-After` support
//! - Structured `tracing` events for request start, retries, and final
//!   errors; error variants carry a truncated body snippet for diagnosis
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), perch_fetch::FetchError> {
//! let fetcher = perch_fetch::PageFetcher::new()?;
//! let page = fetcher.get_text("https://example.org/profile").await?;
//! # let _ = page;
//! # Ok(()) }
//! ```

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tokio::time::sleep;

/// Failures while retrieving the page text.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("client build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status}, body_snippet: {snippet}")]
    Status { status: StatusCode, snippet: String },
    #[error("response body unreadable: {0}")]
    Body(String),
}

/// Fetches a single page as text.
#[derive(Clone)]
pub struct PageFetcher {
    inner: Client,
    pub default_timeout: Duration,
    pub max_retries: usize,
}

impl PageFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| FetchError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            default_timeout: Duration::from_secs(15),
            max_retries: 2,
        })
    }

    /// Override the default per-request timeout.
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// Override the default retry budget.
    pub fn with_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    /// GET `url` and return the response body as text.
    ///
    /// Retries network failures, 429, and 5xx up to the configured budget;
    /// other non-success statuses fail immediately with a body snippet.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::Url(e.to_string()))?;
        let mut attempt = 0usize;

        loop {
            tracing::debug!(
                attempt = attempt + 1,
                max_retries = self.max_retries,
                host_path = %format!("{}{}", url.domain().unwrap_or("-"), url.path()),
                timeout_ms = self.default_timeout.as_millis() as u64,
                "fetch.request.start"
            );

            let t0 = std::time::Instant::now();
            let resp = match self
                .inner
                .get(url.clone())
                .timeout(self.default_timeout)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(err) => {
                    let message = err.to_string();
                    if attempt < self.max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            attempt,
                            backoff_ms = delay.as_millis() as u64,
                            message = %message,
                            "fetch.retrying.network"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(attempt, message = %message, "fetch.network_error");
                    return Err(FetchError::Network(message));
                }
            };

            let status = resp.status();
            let headers = resp.headers().clone();
            let text = match resp.text().await {
                Ok(text) => text,
                Err(err) => return Err(FetchError::Body(err.to_string())),
            };
            tracing::debug!(
                %status,
                duration_ms = t0.elapsed().as_millis() as u64,
                body_len = text.len(),
                "fetch.response"
            );

            if status.is_success() {
                return Ok(text);
            }

            let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if retryable && attempt < self.max_retries {
                attempt += 1;
                let delay = retry_after_delay_secs(&headers)
                    .map(Duration::from_secs)
                    .unwrap_or_else(|| backoff(attempt));
                tracing::warn!(
                    %status,
                    attempt,
                    backoff_ms = delay.as_millis() as u64,
                    body_snippet = %snip_body(&text),
                    "fetch.retrying"
                );
                sleep(delay).await;
                continue;
            }

            let snippet = snip_body(&text);
            tracing::warn!(%status, body_snippet = %snippet, "fetch.error");
            return Err(FetchError::Status { status, snippet });
        }
    }
}

fn backoff(attempt: usize) -> Duration {
    Duration::from_millis(200u64.saturating_mul(1 << (attempt - 1)))
}

fn retry_after_delay_secs(h: &HeaderMap) -> Option<u64> {
    h.get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())?
        .parse()
        .ok()
}

fn snip_body(body: &str) -> String {
    if body.len() <= 500 {
        return body.to_string();
    }
    let mut end = 500;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
