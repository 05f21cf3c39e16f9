//! Application State
//!
//! Shared state for all handlers, wrapped in `Arc` by the router.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::session::SessionContext;
use crate::widgets::DataSources;

/// Shared application state
pub struct AppState {
    /// Remote client and table accessor used by the widgets
    pub sources: Arc<DataSources>,
    /// The one session this backend serves
    pub session: RwLock<SessionContext>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(sources: Arc<DataSources>, session: SessionContext) -> Self {
        Self {
            sources,
            session: RwLock::new(session),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }
}
