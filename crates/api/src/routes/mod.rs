pub mod admin;
pub mod auth;
pub mod booking;
pub mod contact;
pub mod health;
pub mod mentor;
pub mod notification;
pub mod stash;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                    WebSocket (token via ?token=)
///
/// /auth/signup                           signup (public)
/// /auth/login                            login (public)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout (requires auth)
/// /auth/email-exists                     existence check (public)
///
/// /mentors                               list approved mentors (public)
/// /mentors/{id}                          mentor profile (public)
/// /mentors/{id}/slots                    available slots (public)
/// /mentors/{id}/booking-days             calendar days (public)
/// /mentors/{id}/packages                 pricing packages (public)
/// /mentors/{id}/reviews                  reviews (public)
///
/// /mentor/application                    submit, own status (auth)
/// /mentor/profile                        get, update (approved mentor)
/// /mentor/slots                          create (approved mentor)
/// /mentor/slots/{id}                     delete (approved mentor)
/// /mentor/packages                       list, create (approved mentor)
/// /mentor/packages/{id}                  update (approved mentor)
/// /mentor/bookings                       list (approved mentor)
/// /mentor/bookings/{id}/confirm          confirm (POST)
/// /mentor/bookings/{id}/decline          decline (POST)
/// /mentor/bookings/{id}/complete         complete (POST)
/// /mentor/bookings/{id}/no-show          mark no-show (POST)
///
/// /bookings                              book slot, list own (auth)
/// /bookings/{id}/cancel                  cancel (POST)
/// /bookings/{id}/reschedule              reschedule (POST)
/// /bookings/{id}/review                  submit review (POST)
///
/// /notifications                         list (?unread_only, limit, offset)
/// /notifications/read-all                mark all read (POST)
/// /notifications/unread-count            unread count (GET)
/// /notifications/{id}/read               mark read (POST)
///
/// /contact                               contact form (public POST)
///
/// /resume-stash                          stash an action (public POST)
/// /resume-stash/{token}/consume          consume once (auth POST)
///
/// /admin/applications                    pending applications (admin)
/// /admin/applications/{id}/approve       approve (POST)
/// /admin/applications/{id}/reject        reject (POST)
/// /admin/mentors                         invite mentor (POST)
/// /admin/mentors/{id}/verified           toggle visibility (PUT)
/// /admin/mentors/{id}/link-user          attach account (POST)
/// /admin/contact-forms                   contact inbox (GET)
/// /admin/events                          event feed (GET, ?limit)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint.
        .route("/ws", get(ws::ws_handler))
        // Authentication (signup, login, refresh, logout).
        .nest("/auth", auth::router())
        // Public marketplace.
        .nest("/mentors", mentor::public_router())
        // Mentor workspace (application, profile, slots, packages, bookings).
        .nest("/mentor", mentor::workspace_router())
        // Client side of the booking lifecycle.
        .nest("/bookings", booking::router())
        // Notification inbox.
        .nest("/notifications", notification::router())
        // Public contact form.
        .nest("/contact", contact::router())
        // Resume stash for interrupted flows.
        .nest("/resume-stash", stash::router())
        // Admin surface.
        .nest("/admin", admin::router())
}
