//! Repository for the `bookings` table.
//!
//! Every state transition that touches both the booking and its slot runs
//! inside a transaction, so two racing callers can never both claim (or
//! both keep) the same slot. The conditional `UPDATE ... WHERE available =
//! true` is the claim; the partial unique index `uq_bookings_active_slot`
//! backs it up at the constraint level.

use sqlx::PgPool;

use mentorhub_core::booking::BookingStatus;
use mentorhub_core::types::DbId;

use crate::models::booking::{BookSlot, Booking, BookingWithSlot};

/// Column list for `bookings` queries.
const COLUMNS: &str = "id, mentor_id, client_user_id, slot_id, mentee_name, mentee_email, \
                       status, cancel_reason, created_at, updated_at";

/// Column list for booking-with-slot joins (`b` = bookings, `s` = time_slots).
const JOINED_COLUMNS: &str = "b.id, b.mentor_id, b.client_user_id, b.slot_id, b.mentee_name, \
                              b.mentee_email, b.status, b.cancel_reason, s.starts_at, s.ends_at, \
                              b.created_at";

/// Provides transactional lifecycle operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Atomically claim a slot and create a `pending` booking.
    ///
    /// Returns `None` without mutating anything when the slot is already
    /// claimed or does not belong to the given mentor. Of two simultaneous
    /// calls on the same slot, exactly one observes `available = true` and
    /// wins; the other's conditional update matches zero rows.
    pub async fn book_slot(pool: &PgPool, input: &BookSlot) -> Result<Option<Booking>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let claimed: Option<DbId> = sqlx::query_scalar(
            "UPDATE time_slots SET available = false, updated_at = NOW() \
             WHERE id = $1 AND mentor_id = $2 AND available = true \
             RETURNING id",
        )
        .bind(input.slot_id)
        .bind(input.mentor_id)
        .fetch_optional(&mut *tx)
        .await?;

        if claimed.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO bookings (mentor_id, client_user_id, slot_id, mentee_name, mentee_email) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(input.mentor_id)
            .bind(input.client_user_id)
            .bind(input.slot_id)
            .bind(&input.mentee_name)
            .bind(&input.mentee_email)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(booking))
    }

    /// Find a booking by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a `pending` booking to `confirmed`.
    ///
    /// Returns `None` when the booking is not in the `pending` state (or
    /// does not exist). Authorization is the handler's concern.
    pub async fn confirm(pool: &PgPool, booking_id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status = 'confirmed', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(booking_id)
            .fetch_optional(pool)
            .await
    }

    /// Cancel a pending or confirmed booking and release its slot.
    ///
    /// Used by both `cancel_booking` (client) and `decline_booking`
    /// (mentor); the two differ only in authorization and event kind.
    /// Returns `None` when the booking is not in a cancellable state.
    pub async fn cancel(
        pool: &PgPool,
        booking_id: DbId,
        reason: Option<&str>,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE bookings SET status = 'cancelled', cancel_reason = $2, updated_at = NOW() \
             WHERE id = $1 AND status IN ('pending', 'confirmed') \
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(booking_id)
            .bind(reason)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(booking) = booking else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE time_slots SET available = true, updated_at = NOW() WHERE id = $1",
        )
        .bind(booking.slot_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(booking))
    }

    /// Move a booking to a different slot of the same mentor.
    ///
    /// Atomically claims the new slot, repoints the booking, and releases
    /// the old slot. Returns `None` without mutating anything when the new
    /// slot cannot be claimed or the booking is no longer active.
    ///
    /// `cancel_reason` is untouched: it records why a booking was
    /// cancelled, nothing else. A reschedule note travels in the domain
    /// event payload, not on the row.
    pub async fn reschedule(
        pool: &PgPool,
        booking_id: DbId,
        new_slot_id: DbId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // The claim also pins the new slot to the booking's own mentor.
        let claimed: Option<DbId> = sqlx::query_scalar(
            "UPDATE time_slots SET available = false, updated_at = NOW() \
             WHERE id = $1 AND available = true \
               AND mentor_id = (SELECT mentor_id FROM bookings WHERE id = $2) \
             RETURNING id",
        )
        .bind(new_slot_id)
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?;

        if claimed.is_none() {
            return Ok(None);
        }

        // RETURNING cannot surface the pre-update slot_id; lock and read it first.
        let old_slot_id: Option<DbId> = sqlx::query_scalar(
            "SELECT slot_id FROM bookings \
             WHERE id = $1 AND status IN ('pending', 'confirmed') \
             FOR UPDATE",
        )
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(old_slot_id) = old_slot_id else {
            return Ok(None);
        };

        let update = format!(
            "UPDATE bookings \
             SET slot_id = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&update)
            .bind(booking_id)
            .bind(new_slot_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE time_slots SET available = true, updated_at = NOW() WHERE id = $1",
        )
        .bind(old_slot_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(booking))
    }

    /// Move a `confirmed` booking to `completed` or `no_show`.
    ///
    /// Returns `None` when the booking is not confirmed. `to` must be one
    /// of the two terminal session outcomes.
    pub async fn finish(
        pool: &PgPool,
        booking_id: DbId,
        to: BookingStatus,
    ) -> Result<Option<Booking>, sqlx::Error> {
        debug_assert!(matches!(
            to,
            BookingStatus::Completed | BookingStatus::NoShow
        ));
        let query = format!(
            "UPDATE bookings SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'confirmed' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(booking_id)
            .bind(to.as_str())
            .fetch_optional(pool)
            .await
    }

    /// List a client's bookings, newest first, with slot windows.
    pub async fn list_for_client(
        pool: &PgPool,
        client_user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BookingWithSlot>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM bookings b \
             JOIN time_slots s ON s.id = b.slot_id \
             WHERE b.client_user_id = $1 \
             ORDER BY s.starts_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, BookingWithSlot>(&query)
            .bind(client_user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List a mentor's bookings, newest first, with slot windows.
    pub async fn list_for_mentor(
        pool: &PgPool,
        mentor_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BookingWithSlot>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM bookings b \
             JOIN time_slots s ON s.id = b.slot_id \
             WHERE b.mentor_id = $1 \
             ORDER BY s.starts_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, BookingWithSlot>(&query)
            .bind(mentor_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
