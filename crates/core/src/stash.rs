//! Typed resume-stash payload.
//!
//! When an unauthenticated visitor attempts a gated action (booking a slot),
//! the client stores the intent server-side and receives an opaque token.
//! After login the token is consumed exactly once and the action replayed.
//! The payload is a tagged union rather than a free-form JSON blob so new
//! resume kinds are added here, not invented ad hoc by callers.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// How long a stashed action stays consumable.
pub const STASH_TTL_MINS: i64 = 30;

/// An action to replay after the user authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResumeAction {
    /// Resume an interrupted booking flow for a specific mentor slot.
    ResumeBooking { mentor_id: DbId, slot_id: DbId },
}
