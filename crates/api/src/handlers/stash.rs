//! Handlers for the resume stash (interrupted-flow continuation).
//!
//! An anonymous visitor who hits an auth gate mid-flow stashes their intent
//! and gets back an opaque token. After signup or login the token is
//! consumed exactly once; a second consume (replay, double-click, shared
//! link) gets 404.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use mentorhub_core::stash::{ResumeAction, STASH_TTL_MINS};
use mentorhub_core::types::Timestamp;
use mentorhub_db::repositories::StashRepo;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /resume-stash`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStashRequest {
    /// The typed action to replay after authentication.
    pub action: ResumeAction,
    /// Client-side route to return the user to.
    #[validate(length(min = 1, max = 500))]
    pub return_to: String,
}

/// Response for a freshly created stash.
#[derive(Debug, Serialize)]
pub struct StashCreated {
    pub token: Uuid,
    pub expires_at: Timestamp,
}

/// A consumed stash, handed back to the client for replay.
#[derive(Debug, Serialize)]
pub struct StashConsumed {
    pub action: ResumeAction,
    pub return_to: String,
}

/// POST /api/v1/resume-stash
///
/// Unauthenticated on purpose: the whole point is capturing intent from a
/// visitor who is not logged in yet. The action is a typed union, so
/// arbitrary JSON cannot be stashed.
pub async fn create_stash(
    State(state): State<AppState>,
    Json(input): Json<CreateStashRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<StashCreated>>)> {
    input.validate().map_err(AppError::from_validation)?;

    let token = Uuid::new_v4();
    let expires_at = Utc::now() + chrono::Duration::minutes(STASH_TTL_MINS);
    let action = serde_json::to_value(&input.action)
        .map_err(|e| AppError::InternalError(format!("Stash serialization error: {e}")))?;

    StashRepo::create(&state.pool, token, &action, &input.return_to, expires_at).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: StashCreated { token, expires_at },
        }),
    ))
}

/// POST /api/v1/resume-stash/{token}/consume
///
/// Single-use: the row is deleted in the same statement that reads it, so
/// concurrent consumers cannot both succeed. Expired tokens look identical
/// to unknown ones.
pub async fn consume_stash(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(token): Path<Uuid>,
) -> AppResult<Json<DataResponse<StashConsumed>>> {
    let stash = StashRepo::consume(&state.pool, token)
        .await?
        .ok_or_else(|| AppError::NotFound("Stash token is unknown, expired, or already used".into()))?;

    let action: ResumeAction = serde_json::from_value(stash.action)
        .map_err(|e| AppError::InternalError(format!("Stored stash action is malformed: {e}")))?;

    Ok(Json(DataResponse {
        data: StashConsumed {
            action,
            return_to: stash.return_to,
        },
    }))
}
