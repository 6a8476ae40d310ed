//! HTTP client for the external user segment service.
//!
//! Issues `GET {base_url}/user_segment?user_id={id}` and expects
//! `{"segment": "<label>"}` back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{SegmentError, SegmentResolver};
use crate::offer::Segment;

/// HTTP segment resolver configuration.
#[derive(Debug, Clone)]
pub struct HttpSegmentResolverConfig {
    /// Base URL of the segment service (e.g. "http://localhost:1080/api/v1").
    pub base_url: String,

    /// Request timeout. A timed-out lookup is an error like any other.
    pub timeout: Duration,
}

impl Default for HttpSegmentResolverConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_SEGMENT_SERVICE_URL.to_string(),
            timeout: Duration::from_millis(crate::config::DEFAULT_SEGMENT_TIMEOUT_MS),
        }
    }
}

impl HttpSegmentResolverConfig {
    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Deserialize)]
struct SegmentResponse {
    segment: String,
}

/// Segment resolver backed by the remote user segment service.
pub struct HttpSegmentResolver {
    client: Client,
    endpoint: String,
}

impl HttpSegmentResolver {
    pub fn new(config: HttpSegmentResolverConfig) -> Result<Self, SegmentError> {
        if config.base_url.is_empty() {
            return Err(SegmentError::Config(
                "segment service base URL not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SegmentError::Config(e.to_string()))?;

        let endpoint = format!("{}/user_segment", config.base_url.trim_end_matches('/'));

        Ok(Self { client, endpoint })
    }

    /// Full lookup URL without the query string.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn request_error(e: reqwest::Error) -> SegmentError {
    if e.is_timeout() {
        SegmentError::Timeout
    } else {
        SegmentError::Network(e.to_string())
    }
}

#[async_trait]
impl SegmentResolver for HttpSegmentResolver {
    async fn resolve(&self, user_id: i64) -> Result<Segment, SegmentError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("user_id", user_id)])
            .header("accept", "application/json")
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SegmentError::Service(status.as_u16()));
        }

        let body: SegmentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                SegmentError::Timeout
            } else {
                SegmentError::Parse(e.to_string())
            }
        })?;

        debug!(user_id, segment = %body.segment, "segment resolved");
        Ok(body.segment)
    }

    fn name(&self) -> &str {
        "http"
    }
}
