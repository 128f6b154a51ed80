//! Booking lifecycle status machine.
//!
//! A booking starts `pending` when a client claims a slot and moves through
//! the transitions below. Cancellation (client- or mentor-initiated) releases
//! the slot; everything else keeps it claimed.
//!
//! ```text
//! pending   -> confirmed | cancelled
//! confirmed -> completed | cancelled | no_show
//! ```

use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking.
///
/// Serialized in snake_case to match the `bookings.status` column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    /// The database column value for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::NoShow => "no_show",
        }
    }

    /// Parse a database column value. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "no_show" => Some(BookingStatus::NoShow),
            _ => None,
        }
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
                | (Confirmed, NoShow)
        )
    }

    /// Whether a booking in this status still claims its slot.
    ///
    /// Only cancellation releases the slot; completed and no-show bookings
    /// keep it claimed because the window has passed.
    pub fn holds_slot(self) -> bool {
        self != BookingStatus::Cancelled
    }

    /// Whether a booking in this status can still be cancelled.
    pub fn is_cancellable(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
