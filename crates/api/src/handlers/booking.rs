//! Handlers for the booking lifecycle.
//!
//! Client-side endpoints live under `/bookings`; the mentor's side of the
//! lifecycle (confirm, decline, complete, no-show) lives under
//! `/mentor/bookings`. All slot-touching transitions are transactional in
//! the repository; handlers translate the `None` outcomes into 404/409 and
//! publish the corresponding domain event after the commit.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mentorhub_core::booking::BookingStatus;
use mentorhub_core::error::CoreError;
use mentorhub_core::types::DbId;
use mentorhub_db::models::booking::{BookSlot, Booking, BookingWithSlot};
use mentorhub_db::repositories::{BookingRepo, MentorRepo, SlotRepo};
use mentorhub_events::{kinds, DomainEvent};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::ApprovedMentor;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /bookings`.
#[derive(Debug, Deserialize, Validate)]
pub struct BookSlotRequest {
    pub mentor_id: DbId,
    pub slot_id: DbId,
    #[validate(length(min = 1, max = 120))]
    pub mentee_name: String,
    #[validate(email)]
    pub mentee_email: String,
}

/// Request body for cancel / decline.
#[derive(Debug, Default, Deserialize)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

/// Request body for `POST /bookings/{id}/reschedule`.
#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    pub new_slot_id: DbId,
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Client-side handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/bookings
///
/// Atomically claim a slot and create a `pending` booking. Two racing
/// requests for one slot: exactly one gets 201, the other 409.
pub async fn book_slot(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<BookSlotRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Booking>>)> {
    input.validate().map_err(AppError::from_validation)?;

    // Distinguish "no such slot" from "slot taken" before the claim.
    let slot = SlotRepo::find_by_id(&state.pool, input.slot_id)
        .await?
        .filter(|s| s.mentor_id == input.mentor_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "time slot",
            id: input.slot_id,
        }))?;

    let book = BookSlot {
        mentor_id: input.mentor_id,
        slot_id: input.slot_id,
        client_user_id: user.user_id,
        mentee_name: input.mentee_name,
        mentee_email: input.mentee_email,
    };
    let booking = BookingRepo::book_slot(&state.pool, &book)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "This time slot is no longer available".into(),
            ))
        })?;

    state.event_bus.publish(
        DomainEvent::new(kinds::BOOKING_REQUESTED)
            .with_source("booking", booking.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "mentor_id": booking.mentor_id,
                "client_id": booking.client_user_id,
                "slot_id": booking.slot_id,
                "starts_at": slot.starts_at,
                "mentee_name": booking.mentee_name,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

/// GET /api/v1/bookings
///
/// List the caller's bookings (newest first) with slot windows.
pub async fn list_my_bookings(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<BookingWithSlot>>>> {
    let bookings =
        BookingRepo::list_for_client(&state.pool, user.user_id, page.limit(), page.offset())
            .await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// POST /api/v1/bookings/{id}/cancel
///
/// Cancel a pending or confirmed booking and release its slot. Allowed for
/// the booking's client or the mentor's linked account.
pub async fn cancel_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(booking_id): Path<DbId>,
    Json(input): Json<CancelRequest>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking = load_for_party(&state, &user, booking_id).await?;

    let cancelled = BookingRepo::cancel(&state.pool, booking.id, input.reason.as_deref())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Only pending or confirmed bookings can be cancelled".into(),
            ))
        })?;

    publish_cancelled(&state, &user, &cancelled);
    Ok(Json(DataResponse { data: cancelled }))
}

/// POST /api/v1/bookings/{id}/reschedule
///
/// Move the booking to a different available slot of the same mentor.
/// Rejects with 409 (and no mutation) when the new slot cannot be claimed.
pub async fn reschedule_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(booking_id): Path<DbId>,
    Json(input): Json<RescheduleRequest>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking = load_for_party(&state, &user, booking_id).await?;

    let rescheduled = BookingRepo::reschedule(&state.pool, booking.id, input.new_slot_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "The requested slot is not available for this booking".into(),
            ))
        })?;

    state.event_bus.publish(
        DomainEvent::new(kinds::BOOKING_RESCHEDULED)
            .with_source("booking", rescheduled.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "mentor_id": rescheduled.mentor_id,
                "client_id": rescheduled.client_user_id,
                "old_slot_id": booking.slot_id,
                "new_slot_id": rescheduled.slot_id,
                "reason": input.reason,
            })),
    );

    Ok(Json(DataResponse { data: rescheduled }))
}

// ---------------------------------------------------------------------------
// Mentor-side handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/mentor/bookings
///
/// List bookings on the caller's mentor profile, newest first.
pub async fn list_mentor_bookings(
    State(state): State<AppState>,
    mentor: ApprovedMentor,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<BookingWithSlot>>>> {
    let bookings =
        BookingRepo::list_for_mentor(&state.pool, mentor.mentor.id, page.limit(), page.offset())
            .await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// POST /api/v1/mentor/bookings/{id}/confirm
///
/// `pending -> confirmed`, mentor only.
pub async fn confirm_booking(
    State(state): State<AppState>,
    mentor: ApprovedMentor,
    Path(booking_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking = load_for_mentor(&state, &mentor, booking_id).await?;

    let confirmed = BookingRepo::confirm(&state.pool, booking.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Only pending bookings can be confirmed".into(),
            ))
        })?;

    let starts_at = SlotRepo::find_by_id(&state.pool, confirmed.slot_id)
        .await?
        .map(|s| s.starts_at);

    state.event_bus.publish(
        DomainEvent::new(kinds::BOOKING_CONFIRMED)
            .with_source("booking", confirmed.id)
            .with_actor(mentor.user.user_id)
            .with_payload(serde_json::json!({
                "mentor_id": confirmed.mentor_id,
                "client_id": confirmed.client_user_id,
                "slot_id": confirmed.slot_id,
                "starts_at": starts_at,
            })),
    );

    Ok(Json(DataResponse { data: confirmed }))
}

/// POST /api/v1/mentor/bookings/{id}/decline
///
/// Mentor-side cancellation of a pending or confirmed booking; frees the
/// slot for rebooking.
pub async fn decline_booking(
    State(state): State<AppState>,
    mentor: ApprovedMentor,
    Path(booking_id): Path<DbId>,
    Json(input): Json<CancelRequest>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking = load_for_mentor(&state, &mentor, booking_id).await?;

    let cancelled = BookingRepo::cancel(&state.pool, booking.id, input.reason.as_deref())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Only pending or confirmed bookings can be declined".into(),
            ))
        })?;

    publish_cancelled(&state, &mentor.user, &cancelled);
    Ok(Json(DataResponse { data: cancelled }))
}

/// POST /api/v1/mentor/bookings/{id}/complete
///
/// `confirmed -> completed`; unlocks review submission for the client.
pub async fn complete_booking(
    State(state): State<AppState>,
    mentor: ApprovedMentor,
    Path(booking_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Booking>>> {
    finish_booking(state, mentor, booking_id, BookingStatus::Completed).await
}

/// POST /api/v1/mentor/bookings/{id}/no-show
///
/// `confirmed -> no_show`.
pub async fn mark_no_show(
    State(state): State<AppState>,
    mentor: ApprovedMentor,
    Path(booking_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Booking>>> {
    finish_booking(state, mentor, booking_id, BookingStatus::NoShow).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a booking and check the caller is one of its two parties.
///
/// A caller who is neither the client nor the mentor's linked user gets a
/// 404 rather than a 403, so booking IDs do not leak.
async fn load_for_party(
    state: &AppState,
    user: &AuthUser,
    booking_id: DbId,
) -> AppResult<Booking> {
    let booking = BookingRepo::find_by_id(&state.pool, booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "booking",
            id: booking_id,
        }))?;

    if booking.client_user_id == user.user_id {
        return Ok(booking);
    }

    let is_mentor = MentorRepo::find_by_user_id(&state.pool, user.user_id)
        .await?
        .is_some_and(|m| m.id == booking.mentor_id);
    if is_mentor {
        return Ok(booking);
    }

    Err(AppError::Core(CoreError::NotFound {
        entity: "booking",
        id: booking_id,
    }))
}

/// Load a booking belonging to the calling mentor, or 404.
async fn load_for_mentor(
    state: &AppState,
    mentor: &ApprovedMentor,
    booking_id: DbId,
) -> AppResult<Booking> {
    BookingRepo::find_by_id(&state.pool, booking_id)
        .await?
        .filter(|b| b.mentor_id == mentor.mentor.id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "booking",
            id: booking_id,
        }))
}

async fn finish_booking(
    state: AppState,
    mentor: ApprovedMentor,
    booking_id: DbId,
    to: BookingStatus,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking = load_for_mentor(&state, &mentor, booking_id).await?;

    let finished = BookingRepo::finish(&state.pool, booking.id, to)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Only confirmed bookings can be closed out".into(),
            ))
        })?;

    if to == BookingStatus::Completed {
        state.event_bus.publish(
            DomainEvent::new(kinds::BOOKING_COMPLETED)
                .with_source("booking", finished.id)
                .with_actor(mentor.user.user_id)
                .with_payload(serde_json::json!({
                    "mentor_id": finished.mentor_id,
                    "client_id": finished.client_user_id,
                })),
        );
    }

    Ok(Json(DataResponse { data: finished }))
}

fn publish_cancelled(state: &AppState, actor: &AuthUser, booking: &Booking) {
    state.event_bus.publish(
        DomainEvent::new(kinds::BOOKING_CANCELLED)
            .with_source("booking", booking.id)
            .with_actor(actor.user_id)
            .with_payload(serde_json::json!({
                "mentor_id": booking.mentor_id,
                "client_id": booking.client_user_id,
                "slot_id": booking.slot_id,
                "reason": booking.cancel_reason,
            })),
    );
}
