//! Authorization extractors layered on top of [`AuthUser`].
//!
//! Each extractor rejects requests whose caller does not meet the
//! requirement. Use these in handlers to enforce authorization at the
//! type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use mentorhub_core::application::ApplicationStatus;
use mentorhub_core::error::CoreError;
use mentorhub_core::roles::ROLE_ADMIN;
use mentorhub_db::models::mentor::Mentor;
use mentorhub_db::repositories::MentorRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires the caller to be linked to an *approved* mentor profile.
///
/// Resolved against the database on every request (never cached from the
/// token), so an approval that happens mid-session takes effect on the
/// caller's very next request. The three failure modes are distinct so a
/// client can tell the user what to do next:
///
/// - no mentor row: apply first
/// - `pending`: wait for review
/// - `rejected`: application was declined
pub struct ApprovedMentor {
    pub user: AuthUser,
    pub mentor: Mentor,
}

impl FromRequestParts<AppState> for ApprovedMentor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        let mentor = MentorRepo::find_by_user_id(&state.pool, user.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden(
                    "No mentor profile. Submit a mentor application first.".into(),
                ))
            })?;

        match ApplicationStatus::parse(&mentor.application_status) {
            Some(ApplicationStatus::Approved) => Ok(ApprovedMentor { user, mentor }),
            Some(ApplicationStatus::Pending) => Err(AppError::Core(CoreError::Forbidden(
                "Mentor application is still pending review".into(),
            ))),
            Some(ApplicationStatus::Rejected) => Err(AppError::Core(CoreError::Forbidden(
                "Mentor application was rejected".into(),
            ))),
            None => Err(AppError::InternalError(format!(
                "Unknown application status: {}",
                mentor.application_status
            ))),
        }
    }
}
