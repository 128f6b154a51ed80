//! Mentor pricing-package entity model and DTOs.

use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `mentor_packages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MentorPackage {
    pub id: DbId,
    pub mentor_id: DbId,
    pub name: String,
    pub description: String,
    pub sessions_count: i32,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a pricing package.
#[derive(Debug, Deserialize)]
pub struct CreatePackage {
    pub name: String,
    pub description: Option<String>,
    pub sessions_count: i32,
    pub price_cents: i64,
}

/// DTO for updating a pricing package. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdatePackage {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sessions_count: Option<i32>,
    pub price_cents: Option<i64>,
    pub is_active: Option<bool>,
}
