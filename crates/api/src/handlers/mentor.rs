//! Handlers for the public mentor marketplace and the mentor's own
//! profile and availability.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use mentorhub_core::calendar::{booking_days, BookingDay, SlotWindow};
use mentorhub_core::error::CoreError;
use mentorhub_core::types::DbId;
use mentorhub_db::models::mentor::{Mentor, UpdateMentorProfile};
use mentorhub_db::models::package::MentorPackage;
use mentorhub_db::models::review::MentorReview;
use mentorhub_db::models::time_slot::{CreateTimeSlot, TimeSlot};
use mentorhub_db::repositories::{MentorRepo, MentorSort, PackageRepo, ReviewRepo, SlotRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::ApprovedMentor;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /mentors`.
#[derive(Debug, Deserialize)]
pub struct ListMentorsParams {
    pub sort: Option<String>,
}

fn parse_sort(sort: Option<&str>) -> AppResult<MentorSort> {
    match sort {
        None | Some("rating") => Ok(MentorSort::Rating),
        Some("price_asc") => Ok(MentorSort::PriceAsc),
        Some("price_desc") => Ok(MentorSort::PriceDesc),
        Some(other) => Err(AppError::BadRequest(format!(
            "Unknown sort '{other}'. Expected one of: rating, price_asc, price_desc"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Public marketplace handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/mentors?sort=rating|price_asc|price_desc
///
/// List approved, verified mentors. Default sort is rating.
pub async fn list_mentors(
    State(state): State<AppState>,
    Query(params): Query<ListMentorsParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Mentor>>>> {
    let sort = parse_sort(params.sort.as_deref())?;
    let mentors =
        MentorRepo::list_approved(&state.pool, sort, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: mentors }))
}

/// GET /api/v1/mentors/{id}
pub async fn get_mentor(
    State(state): State<AppState>,
    Path(mentor_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Mentor>>> {
    let mentor = find_public_mentor(&state, mentor_id).await?;
    Ok(Json(DataResponse { data: mentor }))
}

/// GET /api/v1/mentors/{id}/slots
///
/// Upcoming available slots for a mentor's booking page.
pub async fn list_mentor_slots(
    State(state): State<AppState>,
    Path(mentor_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TimeSlot>>>> {
    find_public_mentor(&state, mentor_id).await?;
    let slots = SlotRepo::list_upcoming(&state.pool, mentor_id, Utc::now(), true).await?;
    Ok(Json(DataResponse { data: slots }))
}

/// GET /api/v1/mentors/{id}/booking-days
///
/// Upcoming slots grouped into calendar days, for the date picker. Days
/// with no available slot are omitted entirely.
pub async fn list_booking_days(
    State(state): State<AppState>,
    Path(mentor_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<BookingDay>>>> {
    find_public_mentor(&state, mentor_id).await?;
    let now = Utc::now();
    let slots = SlotRepo::list_upcoming(&state.pool, mentor_id, now, false).await?;
    let windows: Vec<SlotWindow> = slots
        .iter()
        .map(|s| SlotWindow {
            slot_id: s.id,
            starts_at: s.starts_at,
            available: s.available,
        })
        .collect();
    Ok(Json(DataResponse {
        data: booking_days(&windows, now),
    }))
}

/// GET /api/v1/mentors/{id}/packages
pub async fn list_mentor_packages(
    State(state): State<AppState>,
    Path(mentor_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MentorPackage>>>> {
    find_public_mentor(&state, mentor_id).await?;
    let packages = PackageRepo::list_for_mentor(&state.pool, mentor_id, true).await?;
    Ok(Json(DataResponse { data: packages }))
}

/// GET /api/v1/mentors/{id}/reviews
pub async fn list_mentor_reviews(
    State(state): State<AppState>,
    Path(mentor_id): Path<DbId>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<MentorReview>>>> {
    find_public_mentor(&state, mentor_id).await?;
    let reviews =
        ReviewRepo::list_for_mentor(&state.pool, mentor_id, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: reviews }))
}

// ---------------------------------------------------------------------------
// Mentor-side handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/mentor/profile
pub async fn get_own_profile(
    mentor: ApprovedMentor,
) -> AppResult<Json<DataResponse<Mentor>>> {
    Ok(Json(DataResponse {
        data: mentor.mentor,
    }))
}

/// PUT /api/v1/mentor/profile
pub async fn update_own_profile(
    State(state): State<AppState>,
    mentor: ApprovedMentor,
    Json(input): Json<UpdateMentorProfile>,
) -> AppResult<Json<DataResponse<Mentor>>> {
    if let Some(rate) = input.hourly_rate_cents {
        if rate < 0 {
            return Err(AppError::Core(CoreError::Validation(
                "Hourly rate cannot be negative".into(),
            )));
        }
    }
    if let Some(years) = input.years_experience {
        if years < 0 {
            return Err(AppError::Core(CoreError::Validation(
                "Years of experience cannot be negative".into(),
            )));
        }
    }

    let updated = MentorRepo::update_profile(&state.pool, mentor.mentor.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "mentor",
            id: mentor.mentor.id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/mentor/slots
///
/// Publish a new bookable slot. Slots must lie in the future and end
/// after they start.
pub async fn create_slot(
    State(state): State<AppState>,
    mentor: ApprovedMentor,
    Json(input): Json<CreateTimeSlot>,
) -> AppResult<(StatusCode, Json<DataResponse<TimeSlot>>)> {
    if input.ends_at <= input.starts_at {
        return Err(AppError::Core(CoreError::Validation(
            "Slot must end after it starts".into(),
        )));
    }
    if input.starts_at <= Utc::now() {
        return Err(AppError::Core(CoreError::Validation(
            "Slot must start in the future".into(),
        )));
    }

    let slot = SlotRepo::create(&state.pool, mentor.mentor.id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: slot })))
}

/// DELETE /api/v1/mentor/slots/{id}
///
/// Remove an unclaimed slot. A slot held by an active booking cannot be
/// deleted; cancel or decline the booking first.
pub async fn delete_slot(
    State(state): State<AppState>,
    mentor: ApprovedMentor,
    Path(slot_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let slot = SlotRepo::find_by_id(&state.pool, slot_id)
        .await?
        .filter(|s| s.mentor_id == mentor.mentor.id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "time slot",
            id: slot_id,
        }))?;

    if !slot.available {
        return Err(AppError::Core(CoreError::Conflict(
            "Slot is held by an active booking".into(),
        )));
    }

    if SlotRepo::delete_available(&state.pool, slot_id, mentor.mentor.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        // Claimed between the read above and the delete.
        Err(AppError::Core(CoreError::Conflict(
            "Slot is held by an active booking".into(),
        )))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a mentor that is visible on the public marketplace, or 404.
async fn find_public_mentor(state: &AppState, mentor_id: DbId) -> AppResult<Mentor> {
    MentorRepo::find_by_id(&state.pool, mentor_id)
        .await?
        .filter(|m| m.application_status == "approved" && m.is_verified)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "mentor",
            id: mentor_id,
        }))
}
