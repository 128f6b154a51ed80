//! Mentor entity model and DTOs.
//!
//! A mentor row doubles as the mentor *application*: it is created when
//! someone applies, carries `application_status`, and becomes a public
//! marketplace profile once approved and verified.

use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `mentors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mentor {
    pub id: DbId,
    /// Linked user account, if any. Exactly one mentor row per user.
    pub user_id: Option<DbId>,
    pub name: String,
    pub title: String,
    pub email: String,
    pub bio: Option<String>,
    pub years_experience: i32,
    pub hourly_rate_cents: i64,
    pub rating_avg: f64,
    pub review_count: i64,
    pub application_status: String,
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting (or re-submitting) a mentor application.
#[derive(Debug, Deserialize)]
pub struct SaveMentorApplication {
    pub name: String,
    pub title: String,
    pub email: String,
    pub bio: Option<String>,
    pub years_experience: i32,
    pub hourly_rate_cents: i64,
}

/// DTO for a mentor editing their own profile. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateMentorProfile {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub years_experience: Option<i32>,
    pub hourly_rate_cents: Option<i64>,
}
