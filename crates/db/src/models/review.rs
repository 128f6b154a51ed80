//! Mentor review entity model and DTOs.

use mentorhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `mentor_reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MentorReview {
    pub id: DbId,
    pub booking_id: DbId,
    pub mentor_id: DbId,
    pub client_user_id: DbId,
    pub rating: i16,
    pub comment: String,
    pub created_at: Timestamp,
}

/// Parameters for inserting a review.
pub struct CreateReview {
    pub booking_id: DbId,
    pub mentor_id: DbId,
    pub client_user_id: DbId,
    pub rating: i16,
    pub comment: String,
}
