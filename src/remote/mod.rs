//! Remote Metrics API
//!
//! Authenticated access to the four metrics endpoints of the remote service.
//!
//! ## Endpoints
//!
//! - `GET /api/v1/sample_assignment_api_1/` - sales overview
//! - `GET /api/v1/sample_assignment_api_3/` - user metrics
//! - `GET /api/v1/sample_assignment_api_4/` - sales comparison series
//! - `GET /api/v1/sample_assignment_api_5/` - inventory status

mod client;
pub mod envelope;

pub use client::ApiClient;

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Logical endpoints of the metrics API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    SalesOverview,
    UserMetrics,
    SalesComparison,
    InventoryStatus,
}

impl Endpoint {
    pub const ALL: [Endpoint; 4] = [
        Endpoint::SalesOverview,
        Endpoint::UserMetrics,
        Endpoint::SalesComparison,
        Endpoint::InventoryStatus,
    ];

    /// Request path under the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::SalesOverview => "/api/v1/sample_assignment_api_1/",
            Endpoint::UserMetrics => "/api/v1/sample_assignment_api_3/",
            Endpoint::SalesComparison => "/api/v1/sample_assignment_api_4/",
            Endpoint::InventoryStatus => "/api/v1/sample_assignment_api_5/",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Errors from the metrics API client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    #[error("Request timed out")]
    Timeout,

    #[error("API error: {status} {status_text}")]
    RequestFailed { status: u16, status_text: String },

    #[error("Invalid response format")]
    InvalidResponseFormat,

    #[error("Server unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths_are_distinct() {
        let mut paths: Vec<_> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 4);
    }

    #[test]
    fn test_error_display() {
        let err = RemoteError::RequestFailed {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 404 Not Found");
        assert_eq!(RemoteError::Timeout.to_string(), "Request timed out");
    }
}
