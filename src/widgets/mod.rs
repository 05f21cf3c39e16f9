//! Dashboard Widgets
//!
//! Six independent panels. Each one owns its lifecycle
//! (`idle → loading → ready | failed`), catches its own errors and never
//! affects its siblings.
//!
//! ```rust,ignore
//! let sources = Arc::new(DataSources::from_config(&config, notifier)?);
//! for panel in Dashboard::mount(sources).await {
//!     println!("{}: {}", panel.kind.title(), panel.state.label());
//! }
//! ```

mod sources;
mod state;

pub use sources::{DataSources, PanelData, SalesComparisonPanel};
pub use state::WidgetState;

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::remote::RemoteError;
use crate::store::StoreError;

/// The six dashboard panels, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    SalesOverview,
    MonthlyComparison,
    UserMetrics,
    SalesComparison,
    InventoryStatus,
    ProductPerformance,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 6] = [
        WidgetKind::SalesOverview,
        WidgetKind::MonthlyComparison,
        WidgetKind::UserMetrics,
        WidgetKind::SalesComparison,
        WidgetKind::InventoryStatus,
        WidgetKind::ProductPerformance,
    ];

    /// URL and CLI name
    pub fn slug(&self) -> &'static str {
        match self {
            WidgetKind::SalesOverview => "sales-overview",
            WidgetKind::MonthlyComparison => "monthly-comparison",
            WidgetKind::UserMetrics => "user-metrics",
            WidgetKind::SalesComparison => "sales-comparison",
            WidgetKind::InventoryStatus => "inventory-status",
            WidgetKind::ProductPerformance => "product-performance",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WidgetKind::SalesOverview => "Sales Overview",
            WidgetKind::MonthlyComparison => "Monthly Comparison",
            WidgetKind::UserMetrics => "User Metrics",
            WidgetKind::SalesComparison => "Sales Comparison",
            WidgetKind::InventoryStatus => "Inventory Status",
            WidgetKind::ProductPerformance => "Product Performance",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Why a widget ended up failed
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    NoData(String),

    /// The loader task panicked or was cancelled
    #[error("Widget task aborted: {0}")]
    Aborted(String),
}

/// A widget together with its final state
#[derive(Debug, Serialize)]
pub struct Panel {
    #[serde(rename = "widget")]
    pub kind: WidgetKind,
    pub title: &'static str,
    pub state: WidgetState<PanelData>,
}

impl Panel {
    fn new(kind: WidgetKind, state: WidgetState<PanelData>) -> Self {
        Self {
            kind,
            title: kind.title(),
            state,
        }
    }
}

/// Mounts widgets against a set of data sources
pub struct Dashboard;

impl Dashboard {
    /// Mount all six widgets concurrently
    ///
    /// Every widget runs on its own task and fetches fresh data; panels come
    /// back in display order.
    pub async fn mount(sources: Arc<DataSources>) -> Vec<Panel> {
        tracing::debug!("Mounting dashboard");

        let handles: Vec<_> = WidgetKind::ALL
            .into_iter()
            .map(|kind| {
                let sources = Arc::clone(&sources);
                (kind, tokio::spawn(async move { run(&sources, kind).await }))
            })
            .collect();

        let mut panels = Vec::with_capacity(handles.len());
        for (kind, handle) in handles {
            let state = match handle.await {
                Ok(state) => state,
                Err(e) => {
                    tracing::error!(widget = %kind, "Widget task failed: {}", e);
                    WidgetState::Failed(WidgetError::Aborted(e.to_string()))
                }
            };
            panels.push(Panel::new(kind, state));
        }
        panels
    }

    /// Mount a single widget
    pub async fn mount_one(sources: Arc<DataSources>, kind: WidgetKind) -> Panel {
        Panel::new(kind, run(&sources, kind).await)
    }
}

async fn run(sources: &DataSources, kind: WidgetKind) -> WidgetState<PanelData> {
    let mut state = WidgetState::Idle;
    state.begin();
    state.settle(sources.load(kind).await);

    match &state {
        WidgetState::Ready(_) => tracing::debug!(widget = %kind, "Widget ready"),
        WidgetState::Failed(e) => tracing::warn!(widget = %kind, "Widget failed: {}", e),
        _ => {}
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemoteConfig;
    use crate::notify::RecordingNotifier;
    use crate::remote::ApiClient;
    use crate::store::{DataAccessor, SqliteStore};
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn healthy_api() -> Router {
        Router::new()
            .route(
                "/api/v1/sample_assignment_api_1/",
                get(|| async {
                    Json(json!({
                        "status": "success",
                        "data": {"totalSales": 50000, "growth": 12, "topProduct": "Widget A"}
                    }))
                }),
            )
            .route(
                "/api/v1/sample_assignment_api_3/",
                get(|| async {
                    Json(json!({
                        "status": "success",
                        "data": {"activeUsers": 1200, "newUsers": 80, "retentionRate": 64}
                    }))
                }),
            )
            .route(
                "/api/v1/sample_assignment_api_4/",
                get(|| async {
                    Json(json!({"status": "success", "data": [
                        {"date": "2024-05-01 08:30:00", "web_sales": 120, "offline_sales": 80},
                        {"date": "2024-05-01 09:30:00", "web_sales": 140, "offline_sales": 95}
                    ]}))
                }),
            )
            .route(
                "/api/v1/sample_assignment_api_5/",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
    }

    async fn sources(router: Router, seed: bool) -> (Arc<DataSources>, Arc<RecordingNotifier>) {
        let base_url = spawn_stub(router).await;
        let notifier = Arc::new(RecordingNotifier::new());
        let api = ApiClient::new(
            RemoteConfig {
                base_url,
                timeout_ms: 5_000,
                ..RemoteConfig::default()
            },
            notifier.clone(),
        )
        .unwrap();

        let store = SqliteStore::open_in_memory().unwrap();
        if seed {
            store.seed_demo().await.unwrap();
        } else {
            store.create_schema().await.unwrap();
        }

        let sources = DataSources::new(
            Arc::new(api),
            DataAccessor::new(Arc::new(store)),
            notifier.clone(),
        );
        (Arc::new(sources), notifier)
    }

    #[test]
    fn test_slugs_round_trip() {
        for kind in WidgetKind::ALL {
            assert_eq!(WidgetKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(WidgetKind::from_slug("nope"), None);
    }

    #[tokio::test]
    async fn test_mount_isolates_failures() {
        let (sources, notifier) = sources(healthy_api(), true).await;

        let panels = Dashboard::mount(sources).await;
        assert_eq!(panels.len(), 6);
        let kinds: Vec<_> = panels.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, WidgetKind::ALL.to_vec());

        for panel in &panels {
            match panel.kind {
                WidgetKind::InventoryStatus => assert!(panel.state.is_failed()),
                _ => assert!(panel.state.is_ready(), "{} not ready", panel.kind),
            }
        }

        let messages = notifier.messages();
        assert!(messages.contains(&"Failed to fetch inventory status data".to_string()));
        assert!(messages.contains(
            &"Failed to fetch from server: API error: 500 Internal Server Error".to_string()
        ));
    }

    #[tokio::test]
    async fn test_sales_overview_end_to_end() {
        let (sources, _) = sources(healthy_api(), true).await;

        let panel = Dashboard::mount_one(sources, WidgetKind::SalesOverview).await;
        match panel.state {
            WidgetState::Ready(PanelData::SalesOverview(view)) => {
                assert_eq!(view.total_sales, Some(50000.0));
                assert_eq!(view.growth, Some(12.0));
                assert_eq!(view.top_product.as_deref(), Some("Widget A"));
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_tables_fail_with_no_data() {
        let (sources, notifier) = sources(healthy_api(), false).await;

        let panel = Dashboard::mount_one(sources, WidgetKind::ProductPerformance).await;
        assert!(matches!(
            panel.state,
            WidgetState::Failed(WidgetError::NoData(_))
        ));
        assert_eq!(
            notifier.messages(),
            vec![
                "No data available for product performance",
                "Failed to fetch product performance data"
            ]
        );
    }

    #[tokio::test]
    async fn test_serialized_panel_shape() {
        let (sources, _) = sources(healthy_api(), true).await;

        let panel = Dashboard::mount_one(sources, WidgetKind::MonthlyComparison).await;
        let json = serde_json::to_value(&panel).unwrap();
        assert_eq!(json["widget"], "monthly-comparison");
        assert_eq!(json["title"], "Monthly Comparison");
        assert_eq!(json["state"]["status"], "ready");
        assert_eq!(json["state"]["data"][0]["id"], 1);
        assert_eq!(json["state"]["data"][0]["name"], "Jan");
        assert_eq!(json["state"]["data"].as_array().unwrap().len(), 12);
    }
}
