//! Time-slot entity model and DTOs.

use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `time_slots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeSlot {
    pub id: DbId,
    pub mentor_id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a mentor publishing a new bookable slot.
#[derive(Debug, Deserialize)]
pub struct CreateTimeSlot {
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}
