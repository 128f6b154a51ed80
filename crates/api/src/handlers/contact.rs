//! Handler for the public contact form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mentorhub_db::models::contact_form::ContactForm;
use mentorhub_db::repositories::ContactFormRepo;
use mentorhub_events::{kinds, DomainEvent};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /contact`.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 4000))]
    pub message: String,
}

/// POST /api/v1/contact
///
/// Unauthenticated submission. Admins are notified through the event bus.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ContactForm>>)> {
    input.validate().map_err(AppError::from_validation)?;

    let form =
        ContactFormRepo::create(&state.pool, &input.name, &input.email, &input.message).await?;

    state.event_bus.publish(
        DomainEvent::new(kinds::CONTACT_SUBMITTED)
            .with_source("contact_form", form.id)
            .with_payload(serde_json::json!({
                "name": form.name,
                "email": form.email,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: form })))
}
