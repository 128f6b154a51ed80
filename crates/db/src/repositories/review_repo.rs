//! Repository for the `mentor_reviews` table.

use sqlx::PgPool;

use mentorhub_core::types::DbId;

use crate::models::review::{CreateReview, MentorReview};

/// Column list for `mentor_reviews` queries.
const COLUMNS: &str =
    "id, booking_id, mentor_id, client_user_id, rating, comment, created_at";

/// Provides operations for mentor reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review and fold it into the mentor's aggregate rating in
    /// one transaction.
    ///
    /// A second review for the same booking trips
    /// `uq_mentor_reviews_booking_id` and rolls the aggregate back with it.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<MentorReview, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO mentor_reviews \
                 (booking_id, mentor_id, client_user_id, rating, comment) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let review = sqlx::query_as::<_, MentorReview>(&query)
            .bind(input.booking_id)
            .bind(input.mentor_id)
            .bind(input.client_user_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE mentors SET \
                 rating_avg = (rating_avg * review_count + $2) / (review_count + 1), \
                 review_count = review_count + 1, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(input.mentor_id)
        .bind(f64::from(input.rating))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(review)
    }

    /// Whether a booking already has a review.
    pub async fn exists_for_booking(pool: &PgPool, booking_id: DbId) -> Result<bool, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM mentor_reviews WHERE booking_id = $1")
                .bind(booking_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0) > 0)
    }

    /// List a mentor's reviews, newest first.
    pub async fn list_for_mentor(
        pool: &PgPool,
        mentor_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MentorReview>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mentor_reviews \
             WHERE mentor_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MentorReview>(&query)
            .bind(mentor_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
