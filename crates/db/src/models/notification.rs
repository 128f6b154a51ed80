//! Notification entity model.
//!
//! Read state is a single `is_read` flag plus `read_at`; the legacy
//! `read`/`is_read`/`seen` triple was collapsed during the schema redesign.

use mentorhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    /// Dot-separated kind matching the originating event type,
    /// e.g. `"booking.requested"`.
    pub kind: String,
    pub title: String,
    pub body: String,
    pub payload: serde_json::Value,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Parameters for inserting a notification.
pub struct CreateNotification {
    pub user_id: DbId,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub payload: serde_json::Value,
}
