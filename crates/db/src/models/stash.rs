//! Resume-stash entity model.

use mentorhub_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `resume_stashes` table.
///
/// `action` holds a serialized [`mentorhub_core::stash::ResumeAction`];
/// it is stored as JSONB and decoded at consumption time.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeStash {
    pub id: DbId,
    pub token: Uuid,
    pub action: serde_json::Value,
    pub return_to: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}
