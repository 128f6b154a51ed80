//! Route definitions for the `/admin` resource.
//!
//! Every endpoint requires the `admin` role, enforced per-handler via the
//! `RequireAdmin` extractor.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /applications                 -> list_pending_applications
/// POST /applications/{id}/approve    -> approve_application
/// POST /applications/{id}/reject     -> reject_application
///
/// POST /mentors                      -> invite_mentor
/// PUT  /mentors/{id}/verified        -> set_verified
/// POST /mentors/{id}/link-user       -> link_user
///
/// GET  /contact-forms                -> list_contact_forms
/// GET  /events                       -> list_events (?limit)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Application review
        .route("/applications", get(admin::list_pending_applications))
        .route(
            "/applications/{id}/approve",
            post(admin::approve_application),
        )
        .route("/applications/{id}/reject", post(admin::reject_application))
        // Mentor onboarding and curation
        .route("/mentors", post(admin::invite_mentor))
        .route("/mentors/{id}/verified", put(admin::set_verified))
        .route("/mentors/{id}/link-user", post(admin::link_user))
        // Inboxes and audit
        .route("/contact-forms", get(admin::list_contact_forms))
        .route("/events", get(admin::list_events))
}
