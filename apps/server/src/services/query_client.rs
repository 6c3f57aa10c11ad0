//! HTTP client for the external query execution service

use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::config::QueryServiceConfig;
use crate::models::QueryEnvelope;
use crate::{Error, Result};

/// Client for the query execution service.
///
/// Owns a single pooled HTTP client built at startup; connections are reused
/// across concurrent requests. Calls are bounded by the configured timeout
/// and never retried.
#[derive(Debug)]
pub struct QueryServiceClient {
    http: reqwest::Client,
    endpoint: String,
}

impl QueryServiceClient {
    pub fn new(config: &QueryServiceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.url.clone(),
        })
    }

    /// Execute a parameterized statement and return the decoded response
    /// object.
    ///
    /// Success is determined by the upstream status code alone; the decoded
    /// body is returned for completeness and callers are free to discard it.
    /// A non-200 upstream status is relayed to the caller via
    /// [`Error::UpstreamStatus`]; the upstream body is only logged.
    pub async fn execute(&self, envelope: &QueryEnvelope) -> Result<Map<String, Value>> {
        let payload = serde_json::to_vec(envelope).map_err(Error::Encoding)?;

        tracing::debug!(sql = envelope.sql(), endpoint = %self.endpoint, "forwarding query");

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(payload)
            .send()
            .await
            .map_err(Error::UpstreamUnreachable)?;

        let status = response.status();
        let body = response.bytes().await.map_err(Error::UpstreamRead)?;

        if status != StatusCode::OK {
            tracing::debug!(
                status = %status,
                body = %String::from_utf8_lossy(&body),
                "query service reported failure"
            );
            return Err(Error::UpstreamStatus(status));
        }

        serde_json::from_slice(&body).map_err(Error::UpstreamMalformedResponse)
    }
}
