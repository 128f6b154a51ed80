//! Booking entity model and DTOs.

use mentorhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub mentor_id: DbId,
    pub client_user_id: DbId,
    pub slot_id: DbId,
    pub mentee_name: String,
    pub mentee_email: String,
    pub status: String,
    pub cancel_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Parameters for the atomic slot-claiming insert.
pub struct BookSlot {
    pub mentor_id: DbId,
    pub slot_id: DbId,
    pub client_user_id: DbId,
    pub mentee_name: String,
    pub mentee_email: String,
}

/// A booking joined with its slot window, as listed on session pages.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingWithSlot {
    pub id: DbId,
    pub mentor_id: DbId,
    pub client_user_id: DbId,
    pub slot_id: DbId,
    pub mentee_name: String,
    pub mentee_email: String,
    pub status: String,
    pub cancel_reason: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub created_at: Timestamp,
}
