//! Route definitions for the client-side `/bookings` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::{booking, review};
use crate::state::AppState;

/// Routes mounted at `/bookings` (all require authentication).
///
/// ```text
/// POST /                    -> book_slot
/// GET  /                    -> list_my_bookings
/// POST /{id}/cancel         -> cancel_booking
/// POST /{id}/reschedule     -> reschedule_booking
/// POST /{id}/review         -> submit_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(booking::book_slot).get(booking::list_my_bookings))
        .route("/{id}/cancel", post(booking::cancel_booking))
        .route("/{id}/reschedule", post(booking::reschedule_booking))
        .route("/{id}/review", post(review::submit_review))
}
