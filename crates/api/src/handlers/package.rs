//! Handlers for a mentor managing their pricing packages.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mentorhub_core::error::CoreError;
use mentorhub_core::types::DbId;
use mentorhub_db::models::package::{CreatePackage, MentorPackage, UpdatePackage};
use mentorhub_db::repositories::PackageRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::ApprovedMentor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /mentor/packages`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePackageRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[validate(range(min = 1, max = 100))]
    pub sessions_count: i32,
    #[validate(range(min = 0))]
    pub price_cents: i64,
}

/// GET /api/v1/mentor/packages
///
/// All of the caller's packages, including inactive ones.
pub async fn list_own_packages(
    State(state): State<AppState>,
    mentor: ApprovedMentor,
) -> AppResult<Json<DataResponse<Vec<MentorPackage>>>> {
    let packages = PackageRepo::list_for_mentor(&state.pool, mentor.mentor.id, false).await?;
    Ok(Json(DataResponse { data: packages }))
}

/// POST /api/v1/mentor/packages
pub async fn create_package(
    State(state): State<AppState>,
    mentor: ApprovedMentor,
    Json(input): Json<CreatePackageRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<MentorPackage>>)> {
    input.validate().map_err(AppError::from_validation)?;

    let create = CreatePackage {
        name: input.name,
        description: input.description,
        sessions_count: input.sessions_count,
        price_cents: input.price_cents,
    };
    let package = PackageRepo::create(&state.pool, mentor.mentor.id, &create).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: package })))
}

/// PUT /api/v1/mentor/packages/{id}
///
/// Partial update; also how packages are deactivated (`is_active: false`).
pub async fn update_package(
    State(state): State<AppState>,
    mentor: ApprovedMentor,
    Path(package_id): Path<DbId>,
    Json(input): Json<UpdatePackage>,
) -> AppResult<Json<DataResponse<MentorPackage>>> {
    if let Some(count) = input.sessions_count {
        if count < 1 {
            return Err(AppError::Core(CoreError::Validation(
                "A package must include at least one session".into(),
            )));
        }
    }
    if let Some(price) = input.price_cents {
        if price < 0 {
            return Err(AppError::Core(CoreError::Validation(
                "Package price cannot be negative".into(),
            )));
        }
    }

    let package = PackageRepo::update(&state.pool, package_id, mentor.mentor.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "package",
            id: package_id,
        }))?;
    Ok(Json(DataResponse { data: package }))
}
