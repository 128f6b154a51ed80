//! Route definitions for the public `/mentors` marketplace and the
//! authenticated `/mentor` workspace.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{application, booking, mentor, package};
use crate::state::AppState;

/// Routes mounted at `/mentors` (public).
///
/// ```text
/// GET /                    -> list_mentors (?sort, limit, offset)
/// GET /{id}                -> get_mentor
/// GET /{id}/slots          -> list_mentor_slots
/// GET /{id}/booking-days   -> list_booking_days
/// GET /{id}/packages       -> list_mentor_packages
/// GET /{id}/reviews        -> list_mentor_reviews
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(mentor::list_mentors))
        .route("/{id}", get(mentor::get_mentor))
        .route("/{id}/slots", get(mentor::list_mentor_slots))
        .route("/{id}/booking-days", get(mentor::list_booking_days))
        .route("/{id}/packages", get(mentor::list_mentor_packages))
        .route("/{id}/reviews", get(mentor::list_mentor_reviews))
}

/// Routes mounted at `/mentor` (authenticated; most require an approved
/// mentor profile, enforced per-handler via the `ApprovedMentor` extractor).
///
/// ```text
/// POST   /application               -> submit_application (any authed user)
/// GET    /application               -> get_own_application (any authed user)
///
/// GET    /profile                   -> get_own_profile
/// PUT    /profile                   -> update_own_profile
///
/// POST   /slots                     -> create_slot
/// DELETE /slots/{id}                -> delete_slot
///
/// GET    /packages                  -> list_own_packages
/// POST   /packages                  -> create_package
/// PUT    /packages/{id}             -> update_package
///
/// GET    /bookings                  -> list_mentor_bookings
/// POST   /bookings/{id}/confirm     -> confirm_booking
/// POST   /bookings/{id}/decline     -> decline_booking
/// POST   /bookings/{id}/complete    -> complete_booking
/// POST   /bookings/{id}/no-show     -> mark_no_show
/// ```
pub fn workspace_router() -> Router<AppState> {
    Router::new()
        // Application lifecycle
        .route(
            "/application",
            post(application::submit_application).get(application::get_own_application),
        )
        // Profile
        .route(
            "/profile",
            get(mentor::get_own_profile).put(mentor::update_own_profile),
        )
        // Availability
        .route("/slots", post(mentor::create_slot))
        .route("/slots/{id}", delete(mentor::delete_slot))
        // Packages
        .route(
            "/packages",
            get(package::list_own_packages).post(package::create_package),
        )
        .route("/packages/{id}", put(package::update_package))
        // Mentor side of the booking lifecycle
        .route("/bookings", get(booking::list_mentor_bookings))
        .route("/bookings/{id}/confirm", post(booking::confirm_booking))
        .route("/bookings/{id}/decline", post(booking::decline_booking))
        .route("/bookings/{id}/complete", post(booking::complete_booking))
        .route("/bookings/{id}/no-show", post(booking::mark_no_show))
}
