//! Handlers for mentor applications (submission and own-status checks).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mentorhub_core::error::CoreError;
use mentorhub_db::models::mentor::{Mentor, SaveMentorApplication};
use mentorhub_db::repositories::MentorRepo;
use mentorhub_events::{kinds, DomainEvent};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /mentor/application`.
#[derive(Debug, Deserialize, Validate)]
pub struct ApplicationRequest {
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

/// POST /api/v1/mentor/application
///
/// Submit a mentor application, or overwrite one that is still pending.
/// Once an application has been approved or rejected it is frozen; a
/// resubmission attempt gets 409.
pub async fn submit_application(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ApplicationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Mentor>>)> {
    input.validate().map_err(AppError::from_validation)?;

    let save = SaveMentorApplication {
        name: input.name,
        title: input.title,
        email: input.email,
        bio: input.bio,
        years_experience: input.years_experience,
        hourly_rate_cents: input.hourly_rate_cents,
    };
    let mentor = MentorRepo::save_application(&state.pool, user.user_id, &save)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Your application has already been decided".into(),
            ))
        })?;

    state.event_bus.publish(
        DomainEvent::new(kinds::MENTOR_APPLICATION_SUBMITTED)
            .with_source("mentor", mentor.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "name": mentor.name,
                "title": mentor.title,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: mentor })))
}

/// GET /api/v1/mentor/application
///
/// The caller's own application (any status), or 404 if they never applied.
pub async fn get_own_application(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Mentor>>> {
    let mentor = MentorRepo::find_by_user_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "mentor application",
            id: user.user_id,
        }))?;
    Ok(Json(DataResponse { data: mentor }))
}
