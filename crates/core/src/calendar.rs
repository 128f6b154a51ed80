//! Booking-day calendar grouping.
//!
//! The booking widget offers a list of selectable days for a mentor. A day
//! is selectable only when it is not in the past and has at least one
//! available slot whose start time is still in the future. Grouping is done
//! here, on already-fetched slot rows, so the rule is unit-testable without
//! a database.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// The subset of a time-slot row the calendar needs.
#[derive(Debug, Clone)]
pub struct SlotWindow {
    pub slot_id: DbId,
    pub starts_at: Timestamp,
    pub available: bool,
}

/// One selectable day in the booking calendar.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDay {
    /// Calendar date (UTC).
    pub date: NaiveDate,
    /// IDs of available slots starting on this day, in start order.
    pub slot_ids: Vec<DbId>,
}

/// Group slots into selectable booking days.
///
/// `now` is the caller's notion of the current instant; days strictly before
/// `now.date_naive()` are never offered, and a slot that has already started
/// does not count towards its day. Days with zero qualifying slots are
/// omitted entirely rather than returned empty.
pub fn booking_days(slots: &[SlotWindow], now: Timestamp) -> Vec<BookingDay> {
    let today = now.date_naive();
    let mut days: Vec<BookingDay> = Vec::new();

    let mut qualifying: Vec<&SlotWindow> = slots
        .iter()
        .filter(|s| s.available && s.starts_at > now)
        .collect();
    qualifying.sort_by_key(|s| s.starts_at);

    for slot in qualifying {
        let date = slot.starts_at.date_naive();
        debug_assert!(date >= today);
        match days.last_mut() {
            Some(day) if day.date == date => day.slot_ids.push(slot.slot_id),
            _ => days.push(BookingDay {
                date,
                slot_ids: vec![slot.slot_id],
            }),
        }
    }

    days
}
