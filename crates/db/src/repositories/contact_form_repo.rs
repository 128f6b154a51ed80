//! Repository for the `contact_forms` table.

use sqlx::PgPool;

use crate::models::contact_form::ContactForm;

/// Column list for `contact_forms` queries.
const COLUMNS: &str = "id, name, email, message, created_at";

/// Provides operations for contact-form submissions.
pub struct ContactFormRepo;

impl ContactFormRepo {
    /// Record a submission, returning the created row.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<ContactForm, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_forms (name, email, message) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactForm>(&query)
            .bind(name)
            .bind(email)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    /// List submissions, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContactForm>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_forms \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ContactForm>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
