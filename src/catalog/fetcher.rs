//! HTTP fetcher with bounded retry
//!
//! Every network read in the pipeline goes through this module. A fetch is
//! one GET per attempt inside an explicit retry loop with a fixed ceiling;
//! transient failures (transport errors and non-2xx statuses) only exist
//! inside the loop, and exhausting the ceiling produces a terminal
//! `FetchError` that callers decide how to absorb.

use crate::config::FetchConfig;
use crate::logsink::LogSender;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Terminal fetch failure after the retry ceiling was exhausted
#[derive(Debug, Error)]
#[error("Unable to fetch {url} after {attempts} attempts: {source}")]
pub struct FetchError {
    /// The URL that could not be fetched
    pub url: String,

    /// How many attempts were made
    pub attempts: u32,

    /// The failure of the final attempt
    #[source]
    pub source: reqwest::Error,
}

/// Builds the shared HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher performing retried GETs against catalog and profile pages
///
/// The fetcher is shared across all workers; per-call logging goes through
/// the caller's `LogSender` so records carry the right producer id.
pub struct Fetcher {
    client: Client,
    max_attempts: u32,
}

impl Fetcher {
    /// Creates a fetcher over an already-built client
    pub fn new(client: Client, max_attempts: u32) -> Self {
        Self {
            client,
            max_attempts,
        }
    }

    /// The configured attempt ceiling
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Fetches a URL, retrying up to the attempt ceiling
    ///
    /// Each retry logs an info record with the attempt number that failed.
    /// Exhaustion logs an error record and returns the terminal error to the
    /// caller, which decides whether the failure aborts a partition, an
    /// artist, or nothing at all.
    pub async fn fetch(&self, url: &str, log: &LogSender) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.max_attempts => {
                    log.info(format!("retrying {}, on attempt {}: {}", url, attempt, e));
                }
                Err(source) => {
                    log.error(format!(
                        "unable to fetch {} after {} attempts: {}",
                        url, attempt, source
                    ));
                    return Err(FetchError {
                        url: url.to_string(),
                        attempts: attempt,
                        source,
                    });
                }
            }
        }
    }

    /// One GET attempt; non-2xx statuses are failures
    async fn try_fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        response.text().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = FetchConfig::default();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_fetcher_keeps_attempt_ceiling() {
        let client = build_http_client(&FetchConfig::default()).unwrap();
        let fetcher = Fetcher::new(client, 5);
        assert_eq!(fetcher.max_attempts(), 5);
    }

    // Retry behavior is exercised against wiremock servers in the
    // integration tests.
}
