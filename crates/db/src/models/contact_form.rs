//! Contact-form entity model and DTO.

use mentorhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `contact_forms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactForm {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: Timestamp,
}
