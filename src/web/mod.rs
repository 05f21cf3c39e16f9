//! Salesboard Web Backend
//!
//! JSON backend for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Session
//! - `GET /login` - Session state (redirects to `/dashboard` when signed in)
//! - `POST /login` - Sign in
//! - `POST /logout` - Sign out
//!
//! ## Dashboard (guarded)
//! - `GET /dashboard` - All six widgets
//! - `GET /dashboard/widgets/:slug` - One widget
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Status
//!
//! `GET /` and unknown paths redirect to `/dashboard`. Guarded routes answer
//! `303 See Other` to `/login` without a signed-in session.

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    let guarded_routes = Router::new()
        .route("/dashboard", get(routes::dashboard::dashboard))
        .route("/dashboard/widgets/:slug", get(routes::dashboard::widget))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&shared_state),
            require_session,
        ));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    Router::new()
        .route("/", get(routes::redirect_home))
        .route(
            "/login",
            get(routes::auth::login_page).post(routes::auth::login),
        )
        .route("/logout", post(routes::auth::logout))
        .merge(guarded_routes)
        .nest("/health", health_routes)
        .fallback(routes::redirect_home)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Redirect to /login unless the session is signed in
async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if state.is_authenticated().await {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "No session, redirecting to /login");
        Redirect::to("/login").into_response()
    }
}

/// Start the server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Salesboard listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Salesboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemoteConfig;
    use crate::notify::RecordingNotifier;
    use crate::remote::ApiClient;
    use crate::session::{Credentials, SessionContext, SessionStore};
    use crate::store::{DataAccessor, SqliteStore};
    use crate::widgets::DataSources;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    async fn create_test_app() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let notifier = Arc::new(RecordingNotifier::new());

        // Nothing listens here: every remote widget fails fast
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let api = ApiClient::new(
            RemoteConfig {
                base_url,
                timeout_ms: 2_000,
                ..RemoteConfig::default()
            },
            notifier.clone(),
        )
        .unwrap();
        let store = SqliteStore::open_in_memory().unwrap();
        store.seed_demo().await.unwrap();
        let sources = DataSources::new(
            Arc::new(api),
            DataAccessor::new(Arc::new(store)),
            notifier.clone(),
        );

        let session = SessionContext::initialize(
            SessionStore::new(dir.path().join("auth.json")),
            Credentials {
                username: "trial".to_string(),
                password: "assignment123".to_string(),
            },
            notifier,
        );

        let router = build_router(AppState::new(Arc::new(sources), session));
        (router, dir)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn login_request(username: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(
                r#"{{"username": "{}", "password": "{}"}}"#,
                username, password
            )))
            .unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _dir) = create_test_app().await;

        let response = app.oneshot(get_request("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _dir) = create_test_app().await;

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["store"], "sqlite");
    }

    #[tokio::test]
    async fn test_dashboard_requires_session() {
        let (app, _dir) = create_test_app().await;

        let response = app.oneshot(get_request("/dashboard")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn test_unknown_paths_redirect_to_dashboard() {
        let (app, _dir) = create_test_app().await;

        for uri in ["/", "/no/such/page"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(location(&response), "/dashboard");
        }
    }

    #[tokio::test]
    async fn test_bad_credentials_are_unauthorized() {
        let (app, _dir) = create_test_app().await;

        let response = app
            .clone()
            .oneshot(login_request("trial", "nope"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        assert!(body["request_id"].is_string());

        let response = app.oneshot(get_request("/dashboard")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_login_then_dashboard() {
        let (app, _dir) = create_test_app().await;

        let response = app
            .clone()
            .oneshot(login_request("trial", "assignment123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["username"], "trial");

        let response = app.clone().oneshot(get_request("/login")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");

        let response = app.oneshot(get_request("/dashboard")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let panels = body["panels"].as_array().unwrap();
        assert_eq!(panels.len(), 6);
        // Remote widgets fail, table widgets still load
        assert_eq!(panels[0]["state"]["status"], "failed");
        assert_eq!(panels[1]["state"]["status"], "ready");
        assert_eq!(panels[5]["state"]["status"], "ready");
    }

    #[tokio::test]
    async fn test_single_widget_routes() {
        let (app, _dir) = create_test_app().await;
        app.clone()
            .oneshot(login_request("trial", "assignment123"))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(get_request("/dashboard/widgets/product-performance"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["widget"], "product-performance");
        assert_eq!(body["state"]["data"][0]["product"], "Widget A");

        let response = app
            .oneshot(get_request("/dashboard/widgets/weather"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_logout_closes_the_dashboard() {
        let (app, _dir) = create_test_app().await;
        app.clone()
            .oneshot(login_request("trial", "assignment123"))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");

        let response = app.oneshot(get_request("/dashboard")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }
}
