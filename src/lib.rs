//! # Salesboard
//!
//! Data layer and JSON backend for a sales analytics dashboard. Metrics come
//! from two places: a remote HTTP API that wraps its payloads in a
//! `{status, message, data}` envelope, and three relational tables. Both are
//! normalized into fixed view-models for six independent widgets.
//!
//! ## Modules
//!
//! - [`remote`]: Authenticated client for the metrics API
//! - [`store`]: Full-table reads over SQLite or a hosted REST backend
//! - [`views`]: Pure adapters from raw payloads to display shapes
//! - [`widgets`]: The six panels and their lifecycle
//! - [`session`]: Sign-in state for the demo account
//! - [`notify`]: User-visible toast messages
//! - [`web`]: Axum backend with the session guard
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use salesboard::{Config, Dashboard, DataSources, TracingNotifier};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let sources = DataSources::from_config(&config, Arc::new(TracingNotifier))?;
//!
//!     for panel in Dashboard::mount(Arc::new(sources)).await {
//!         println!("{}: {}", panel.title, panel.state.label());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod notify;
pub mod remote;
pub mod session;
pub mod store;
pub mod views;
pub mod web;
pub mod widgets;

// Re-export top-level types for convenience
pub use config::{Config, ConfigError, LoggingConfig, RemoteConfig, StoreBackend, StoreConfig};

pub use notify::{Notifier, RecordingNotifier, SharedNotifier, Toast, ToastLevel, TracingNotifier};

pub use remote::{ApiClient, Endpoint, RemoteError};

pub use store::{
    DataAccessor, MonthlyComparisonRecord, ProductRecord, RestStore, SalesRecord, SqliteStore,
    StoreError, StoreResult, Table, TableRows, TableSource,
};

pub use session::{Credentials, Session, SessionContext, SessionError, SessionStore};

pub use widgets::{Dashboard, DataSources, Panel, PanelData, WidgetError, WidgetKind, WidgetState};

pub use web::{build_router, serve, ApiError, AppState};
