//! Repository for the `mentor_packages` table.

use mentorhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::package::{CreatePackage, MentorPackage, UpdatePackage};

/// Column list for `mentor_packages` queries.
const COLUMNS: &str = "id, mentor_id, name, description, sessions_count, price_cents, \
                       is_active, created_at, updated_at";

/// Provides CRUD operations for mentor pricing packages.
pub struct PackageRepo;

impl PackageRepo {
    /// Create a package for a mentor, returning the created row.
    pub async fn create(
        pool: &PgPool,
        mentor_id: DbId,
        input: &CreatePackage,
    ) -> Result<MentorPackage, sqlx::Error> {
        let query = format!(
            "INSERT INTO mentor_packages \
                 (mentor_id, name, description, sessions_count, price_cents) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MentorPackage>(&query)
            .bind(mentor_id)
            .bind(&input.name)
            .bind(input.description.as_deref().unwrap_or(""))
            .bind(input.sessions_count)
            .bind(input.price_cents)
            .fetch_one(pool)
            .await
    }

    /// List a mentor's packages, cheapest first.
    ///
    /// When `active_only` is `true` (the public view), deactivated
    /// packages are filtered out.
    pub async fn list_for_mentor(
        pool: &PgPool,
        mentor_id: DbId,
        active_only: bool,
    ) -> Result<Vec<MentorPackage>, sqlx::Error> {
        let filter = if active_only { "AND is_active = true" } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM mentor_packages \
             WHERE mentor_id = $1 {filter} \
             ORDER BY price_cents"
        );
        sqlx::query_as::<_, MentorPackage>(&query)
            .bind(mentor_id)
            .fetch_all(pool)
            .await
    }

    /// Patch a package belonging to a mentor.
    ///
    /// Returns `None` when no package with that ID belongs to the mentor.
    pub async fn update(
        pool: &PgPool,
        package_id: DbId,
        mentor_id: DbId,
        input: &UpdatePackage,
    ) -> Result<Option<MentorPackage>, sqlx::Error> {
        let query = format!(
            "UPDATE mentor_packages SET \
                 name = COALESCE($3, name), \
                 description = COALESCE($4, description), \
                 sessions_count = COALESCE($5, sessions_count), \
                 price_cents = COALESCE($6, price_cents), \
                 is_active = COALESCE($7, is_active), \
                 updated_at = NOW() \
             WHERE id = $1 AND mentor_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MentorPackage>(&query)
            .bind(package_id)
            .bind(mentor_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.sessions_count)
            .bind(input.price_cents)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
