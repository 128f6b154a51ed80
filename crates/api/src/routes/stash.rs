//! Route definitions for the `/resume-stash` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::stash;
use crate::state::AppState;

/// Routes mounted at `/resume-stash`.
///
/// ```text
/// POST /                    -> create_stash (public)
/// POST /{token}/consume     -> consume_stash (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(stash::create_stash))
        .route("/{token}/consume", post(stash::consume_stash))
}
