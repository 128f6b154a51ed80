//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signup        -> signup
/// POST /login         -> login
/// POST /refresh       -> refresh
/// POST /logout        -> logout (requires auth)
/// GET  /email-exists  -> email_exists
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/email-exists", get(auth::email_exists))
}
