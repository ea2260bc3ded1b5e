//! Price source abstraction for reading snapshots from the backend endpoint

use crate::{
    constants::USER_AGENT,
    error::SourceError,
    types::SnapshotPayload,
};
use async_trait::async_trait;
use reqwest::Client;

/// Trait for price snapshot sources
///
/// The controller only ever issues one read per refresh cycle; a source never
/// retries on its own.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetches the current snapshot payload
    ///
    /// # Returns
    /// The decoded payload (which may itself carry an `error` field), or an
    /// error if the request could not complete or the body could not be decoded
    async fn fetch_snapshot(&self) -> Result<SnapshotPayload, SourceError>;

    /// Returns the name of this source
    fn source_name(&self) -> &str;
}

/// Reads snapshots from the backend's JSON endpoint over HTTP
///
/// No request timeout is configured: a request runs until it completes or the
/// transport fails.
pub struct HttpPriceSource {
    client: Client,
    endpoint_url: String,
}

impl HttpPriceSource {
    /// Creates a new HTTP source for the given endpoint
    pub fn new(endpoint_url: impl Into<String>) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(SourceError::Network)?;

        Ok(Self {
            client,
            endpoint_url: endpoint_url.into(),
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn fetch_snapshot(&self) -> Result<SnapshotPayload, SourceError> {
        tracing::debug!(url = %self.endpoint_url, "Fetching price snapshot");

        let response = self
            .client
            .get(&self.endpoint_url)
            .send()
            .await
            .map_err(SourceError::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(SourceError::Network)?;

        if !status.is_success() {
            // The backend reports its own failures as `{"error": ...}` with a 5xx
            if let Ok(payload) = serde_json::from_str::<SnapshotPayload>(&body) {
                if payload.error.is_some() {
                    return Ok(payload);
                }
            }
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            SourceError::Decode(format!(
                "Failed to parse price snapshot: {}. Response: {}",
                e, body
            ))
        })
    }

    fn source_name(&self) -> &str {
        "http"
    }
}
