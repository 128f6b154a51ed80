//! Admin-only handlers: application review, mentor onboarding, contact
//! inbox, and the domain event feed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mentorhub_core::application::ApplicationStatus;
use mentorhub_core::error::CoreError;
use mentorhub_core::types::DbId;
use mentorhub_db::models::contact_form::ContactForm;
use mentorhub_db::models::event::EventRow;
use mentorhub_db::models::mentor::{Mentor, SaveMentorApplication};
use mentorhub_db::repositories::{ContactFormRepo, EventRepo, MentorRepo};
use mentorhub_events::{kinds, DomainEvent};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/mentors` (direct invite).
#[derive(Debug, Deserialize, Validate)]
pub struct InviteMentorRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 4000))]
    pub bio: Option<String>,
    #[validate(range(min = 0, max = 80))]
    pub years_experience: i32,
    #[validate(range(min = 0))]
    pub hourly_rate_cents: i64,
}

/// Request body for `PUT /admin/mentors/{id}/verified`.
#[derive(Debug, Deserialize)]
pub struct SetVerifiedRequest {
    pub is_verified: bool,
}

/// Request body for `POST /admin/mentors/{id}/link-user`.
#[derive(Debug, Deserialize)]
pub struct LinkUserRequest {
    pub user_id: DbId,
}

/// Query parameters for `GET /admin/events`.
#[derive(Debug, Deserialize)]
pub struct EventFeedParams {
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Application review
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/applications
///
/// Pending applications, oldest first.
pub async fn list_pending_applications(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Mentor>>>> {
    let applications =
        MentorRepo::list_pending_applications(&state.pool, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// POST /api/v1/admin/applications/{id}/approve
pub async fn approve_application(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(mentor_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Mentor>>> {
    decide(state, admin.user_id, mentor_id, ApplicationStatus::Approved).await
}

/// POST /api/v1/admin/applications/{id}/reject
pub async fn reject_application(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(mentor_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Mentor>>> {
    decide(state, admin.user_id, mentor_id, ApplicationStatus::Rejected).await
}

/// Decisions only apply to pending applications; deciding twice gets 409.
async fn decide(
    state: AppState,
    admin_user_id: DbId,
    mentor_id: DbId,
    decision: ApplicationStatus,
) -> AppResult<Json<DataResponse<Mentor>>> {
    MentorRepo::find_by_id(&state.pool, mentor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "mentor application",
            id: mentor_id,
        }))?;

    let mentor = MentorRepo::decide_application(&state.pool, mentor_id, decision)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "This application has already been decided".into(),
            ))
        })?;

    let kind = match decision {
        ApplicationStatus::Approved => kinds::MENTOR_APPROVED,
        ApplicationStatus::Rejected => kinds::MENTOR_REJECTED,
        ApplicationStatus::Pending => unreachable!("pending is not a decision"),
    };
    state.event_bus.publish(
        DomainEvent::new(kind)
            .with_source("mentor", mentor.id)
            .with_actor(admin_user_id)
            .with_payload(serde_json::json!({ "name": mentor.name })),
    );

    Ok(Json(DataResponse { data: mentor }))
}

// ---------------------------------------------------------------------------
// Mentor onboarding and curation
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/mentors
///
/// Invite a mentor directly: the profile is created pre-approved and
/// verified, with no linked account. The invite email carries a signup
/// link; the account is attached later via link-user.
pub async fn invite_mentor(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<InviteMentorRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Mentor>>)> {
    input.validate().map_err(AppError::from_validation)?;

    if MentorRepo::email_exists(&state.pool, &input.email).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "A mentor with this email already exists".into(),
        )));
    }

    let save = SaveMentorApplication {
        name: input.name,
        title: input.title,
        email: input.email,
        bio: input.bio,
        years_experience: input.years_experience,
        hourly_rate_cents: input.hourly_rate_cents,
    };
    let mentor = MentorRepo::create_invited(&state.pool, &save).await?;

    let signup_url = format!("{}/signup?invited=1", state.config.public_base_url);
    state.event_bus.publish(
        DomainEvent::new(kinds::MENTOR_INVITED)
            .with_source("mentor", mentor.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "name": mentor.name,
                "signup_url": signup_url,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: mentor })))
}

/// PUT /api/v1/admin/mentors/{id}/verified
///
/// Toggle marketplace visibility for an approved mentor.
pub async fn set_verified(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(mentor_id): Path<DbId>,
    Json(input): Json<SetVerifiedRequest>,
) -> AppResult<Json<DataResponse<Mentor>>> {
    let mentor = MentorRepo::set_verified(&state.pool, mentor_id, input.is_verified)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "mentor",
            id: mentor_id,
        }))?;
    Ok(Json(DataResponse { data: mentor }))
}

/// POST /api/v1/admin/mentors/{id}/link-user
///
/// Attach a signed-up account to an invited mentor profile. Linking is
/// one-shot: a profile that already has a user keeps it.
pub async fn link_user(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(mentor_id): Path<DbId>,
    Json(input): Json<LinkUserRequest>,
) -> AppResult<Json<DataResponse<Mentor>>> {
    let mentor = MentorRepo::find_by_id(&state.pool, mentor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "mentor",
            id: mentor_id,
        }))?;

    if mentor.user_id.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Mentor profile is already linked to a user".into(),
        )));
    }

    let linked = MentorRepo::link_user(&state.pool, mentor_id, input.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Mentor profile is already linked to a user".into(),
            ))
        })?;
    Ok(Json(DataResponse { data: linked }))
}

// ---------------------------------------------------------------------------
// Inboxes and audit feed
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/contact-forms
pub async fn list_contact_forms(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ContactForm>>>> {
    let forms = ContactFormRepo::list(&state.pool, page.limit(), page.offset()).await?;
    Ok(Json(DataResponse { data: forms }))
}

/// GET /api/v1/admin/events?limit=...
///
/// Most recent persisted domain events, for debugging and audit.
pub async fn list_events(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Query(params): Query<EventFeedParams>,
) -> AppResult<Json<DataResponse<Vec<EventRow>>>> {
    let limit = params.limit.unwrap_or(50).clamp(1, 500);
    let events = EventRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: events }))
}
