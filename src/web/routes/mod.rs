//! Route handlers organized by functionality.

pub mod auth;
pub mod dashboard;
pub mod health;

use axum::response::Redirect;

/// GET / and every unknown path
pub async fn redirect_home() -> Redirect {
    Redirect::to("/dashboard")
}
