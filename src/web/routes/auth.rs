//! Sign-in Routes
//!
//! - GET /login - Current session, or redirect when already signed in
//! - POST /login - Sign in with the demo credentials
//! - POST /logout - Sign out and return to /login

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use std::sync::Arc;

use crate::web::dto::{LoginRequest, SessionResponse};
use crate::web::error::{ApiError, ApiResult};
use crate::web::state::AppState;

/// GET /login
pub async fn login_page(State(state): State<Arc<AppState>>) -> Response {
    let session = state.session.read().await;
    if session.is_authenticated() {
        return Redirect::to("/dashboard").into_response();
    }
    Json(SessionResponse::from(session.session())).into_response()
}

/// POST /login
///
/// 200 with the new session, 401 when the credentials do not match.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let mut session = state.session.write().await;
    if !session.authenticate(&request.username, &request.password) {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }
    Ok(Json(SessionResponse::from(session.session())))
}

/// POST /logout
pub async fn logout(State(state): State<Arc<AppState>>) -> Redirect {
    state.session.write().await.clear();
    Redirect::to("/login")
}
