//! Handler for submitting a review on a completed booking.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mentorhub_core::booking::BookingStatus;
use mentorhub_core::error::CoreError;
use mentorhub_core::types::DbId;
use mentorhub_db::models::review::{CreateReview, MentorReview};
use mentorhub_db::repositories::{BookingRepo, ReviewRepo};
use mentorhub_events::{kinds, DomainEvent};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /bookings/{id}/review`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    #[validate(length(min = 1, max = 4000))]
    pub comment: String,
}

/// POST /api/v1/bookings/{id}/review
///
/// One review per booking, by the booking's client, only after the mentor
/// marked the session completed. Input is validated before any write; the
/// mentor's rating aggregate is updated in the same transaction as the
/// insert.
pub async fn submit_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(booking_id): Path<DbId>,
    Json(input): Json<SubmitReviewRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<MentorReview>>)> {
    input.validate().map_err(AppError::from_validation)?;

    let booking = BookingRepo::find_by_id(&state.pool, booking_id)
        .await?
        .filter(|b| b.client_user_id == user.user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "booking",
            id: booking_id,
        }))?;

    if booking.status != BookingStatus::Completed.as_str() {
        return Err(AppError::Core(CoreError::Conflict(
            "Only completed bookings can be reviewed".into(),
        )));
    }

    if ReviewRepo::exists_for_booking(&state.pool, booking.id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "This booking has already been reviewed".into(),
        )));
    }

    let create = CreateReview {
        booking_id: booking.id,
        mentor_id: booking.mentor_id,
        client_user_id: user.user_id,
        rating: input.rating,
        comment: input.comment,
    };
    // The unique index on booking_id backstops the exists check under races.
    let review = ReviewRepo::create(&state.pool, &create).await?;

    state.event_bus.publish(
        DomainEvent::new(kinds::REVIEW_SUBMITTED)
            .with_source("review", review.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "mentor_id": review.mentor_id,
                "booking_id": review.booking_id,
                "rating": review.rating,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}
