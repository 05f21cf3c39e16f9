//! Request and response bodies

use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::widgets::Panel;

/// POST /login body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session as seen by the client
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            authenticated: session.authenticated,
            username: session.username.clone(),
        }
    }
}

/// GET /dashboard body
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub username: Option<String>,
    pub panels: Vec<Panel>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,
    /// Name of the table backend
    pub store: String,
    pub uptime_seconds: u64,
    pub version: String,
}
