//! Dashboard Routes
//!
//! Both routes sit behind the session guard.
//!
//! - GET /dashboard - Mount all six widgets
//! - GET /dashboard/widgets/:slug - Mount one widget

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::web::dto::DashboardResponse;
use crate::web::error::{ApiError, ApiResult};
use crate::web::state::AppState;
use crate::widgets::{Dashboard, Panel, WidgetKind};

/// GET /dashboard
///
/// Each request fetches fresh data; failed widgets are reported in their
/// panel and never fail the response.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    let username = state.session.read().await.username().map(String::from);
    let panels = Dashboard::mount(Arc::clone(&state.sources)).await;

    Json(DashboardResponse { username, panels })
}

/// GET /dashboard/widgets/:slug
pub async fn widget(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Panel>> {
    let kind = WidgetKind::from_slug(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("Widget '{}' not found", slug)))?;

    Ok(Json(
        Dashboard::mount_one(Arc::clone(&state.sources), kind).await,
    ))
}
