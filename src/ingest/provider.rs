//! Lyrics provider seam
//!
//! The pipeline asks one question of the provider: "give me every work for
//! this `(name, artist id)` pair". The trait keeps the wire protocol out of
//! the core and lets tests substitute scripted providers; the HTTP
//! implementation talks to a JSON API.

use crate::config::ProviderConfig;
use crate::model::Work;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// Failure of one provider call
///
/// Provider failures carry no structure the pipeline can act on beyond the
/// message; every one of them is considered retryable up to the caller's
/// ceiling.
#[derive(Debug, Error)]
#[error("provider error: {message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Source of an artist's works
#[async_trait]
pub trait WorkProvider: Send + Sync {
    /// Fetches every work for the given artist
    async fn fetch_works(&self, name: &str, artist_id: u64) -> Result<Vec<Work>, ProviderError>;
}

/// Provider backed by an HTTP JSON API
///
/// GETs `<api-base-url>/artists/<id>/songs?name=<display name>` and expects
/// a JSON array of work records.
pub struct HttpWorkProvider {
    client: Client,
    api_base_url: String,
}

impl HttpWorkProvider {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn works_url(&self, artist_id: u64) -> String {
        format!("{}/artists/{}/songs", self.api_base_url, artist_id)
    }
}

#[async_trait]
impl WorkProvider for HttpWorkProvider {
    async fn fetch_works(&self, name: &str, artist_id: u64) -> Result<Vec<Work>, ProviderError> {
        let response = self
            .client
            .get(self.works_url(artist_id))
            .query(&[("name", name)])
            .send()
            .await?
            .error_for_status()?;

        let works: Vec<Work> = response.json().await?;
        Ok(works)
    }
}
