//! Repository for the `time_slots` table.

use mentorhub_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::time_slot::{CreateTimeSlot, TimeSlot};

/// Column list for `time_slots` queries.
const COLUMNS: &str = "id, mentor_id, starts_at, ends_at, available, created_at, updated_at";

/// Provides CRUD operations for time slots.
///
/// Claiming and releasing slots as part of a booking transition lives in
/// [`BookingRepo`](crate::repositories::BookingRepo), not here.
pub struct SlotRepo;

impl SlotRepo {
    /// Publish a new bookable slot for a mentor.
    pub async fn create(
        pool: &PgPool,
        mentor_id: DbId,
        input: &CreateTimeSlot,
    ) -> Result<TimeSlot, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_slots (mentor_id, starts_at, ends_at) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(mentor_id)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .fetch_one(pool)
            .await
    }

    /// Find a slot by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimeSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_slots WHERE id = $1");
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a mentor's slots starting at or after `from`, in start order.
    ///
    /// When `available_only` is `true`, claimed slots are filtered out
    /// (the public booking view); mentors see everything.
    pub async fn list_upcoming(
        pool: &PgPool,
        mentor_id: DbId,
        from: Timestamp,
        available_only: bool,
    ) -> Result<Vec<TimeSlot>, sqlx::Error> {
        let filter = if available_only {
            "AND available = true"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM time_slots \
             WHERE mentor_id = $1 AND starts_at >= $2 {filter} \
             ORDER BY starts_at"
        );
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(mentor_id)
            .bind(from)
            .fetch_all(pool)
            .await
    }

    /// Delete an unclaimed slot belonging to a mentor.
    ///
    /// Returns `true` if a row was deleted. A claimed slot (`available =
    /// false`) is never deleted; cancel the booking first.
    pub async fn delete_available(
        pool: &PgPool,
        slot_id: DbId,
        mentor_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM time_slots \
             WHERE id = $1 AND mentor_id = $2 AND available = true",
        )
        .bind(slot_id)
        .bind(mentor_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
