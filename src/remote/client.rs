//! Metrics API Client
//!
//! HTTP client for the remote metrics service. Every request carries the
//! configured basic-auth credentials and is bounded by a single timeout.

use reqwest::{header::CONTENT_TYPE, Client};
use serde_json::Value;
use std::time::Duration;

use super::{envelope, Endpoint, RemoteError};
use crate::config::RemoteConfig;
use crate::notify::SharedNotifier;

/// Metrics API client
pub struct ApiClient {
    client: Client,
    config: RemoteConfig,
    notifier: SharedNotifier,
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: RemoteConfig, notifier: SharedNotifier) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| RemoteError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            config,
            notifier,
        })
    }

    /// Full URL for an endpoint
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path()
        )
    }

    /// Fetch an endpoint and return its unwrapped payload
    ///
    /// Failures are reported to the notifier before being returned. No retry
    /// is attempted.
    pub async fn fetch(&self, endpoint: Endpoint) -> Result<Value, RemoteError> {
        match self.fetch_unreported(endpoint).await {
            Ok(payload) => Ok(payload),
            Err(e) => {
                tracing::error!(endpoint = %endpoint, error = %e, "API request failed");
                match &e {
                    RemoteError::Timeout => self.notifier.error("Request timed out."),
                    other => self
                        .notifier
                        .error(&format!("Failed to fetch from server: {}", other)),
                }
                Err(e)
            }
        }
    }

    async fn fetch_unreported(&self, endpoint: Endpoint) -> Result<Value, RemoteError> {
        let url = self.url(endpoint);
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::RequestFailed {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response.bytes().await.map_err(classify)?;
        let payload = envelope::unwrap_body(&body)?;

        tracing::debug!(endpoint = %endpoint, "Fetched payload");
        Ok(payload)
    }
}

/// Map a transport error onto the client's error kinds
fn classify(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout
    } else if e.is_decode() {
        RemoteError::InvalidResponseFormat
    } else {
        RemoteError::Unavailable(e.to_string())
    }
}
