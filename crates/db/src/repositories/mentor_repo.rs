//! Repository for the `mentors` table.

use mentorhub_core::application::ApplicationStatus;
use mentorhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::mentor::{Mentor, SaveMentorApplication, UpdateMentorProfile};

/// Column list for `mentors` queries.
const COLUMNS: &str = "id, user_id, name, title, email, bio, years_experience, \
                       hourly_rate_cents, rating_avg, review_count, application_status, \
                       is_verified, created_at, updated_at";

/// Sort orders accepted by the public mentor listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentorSort {
    Rating,
    PriceAsc,
    PriceDesc,
}

impl MentorSort {
    fn order_clause(self) -> &'static str {
        match self {
            MentorSort::Rating => "rating_avg DESC, review_count DESC",
            MentorSort::PriceAsc => "hourly_rate_cents ASC",
            MentorSort::PriceDesc => "hourly_rate_cents DESC",
        }
    }
}

/// Provides CRUD operations for mentors and their applications.
pub struct MentorRepo;

impl MentorRepo {
    /// List approved, verified mentors for the public marketplace.
    pub async fn list_approved(
        pool: &PgPool,
        sort: MentorSort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Mentor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mentors \
             WHERE application_status = 'approved' AND is_verified = true \
             ORDER BY {order} \
             LIMIT $1 OFFSET $2",
            order = sort.order_clause()
        );
        sqlx::query_as::<_, Mentor>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a mentor by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Mentor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mentors WHERE id = $1");
        sqlx::query_as::<_, Mentor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the mentor row linked to a user account, if any.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Mentor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mentors WHERE user_id = $1");
        sqlx::query_as::<_, Mentor>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether any mentor row uses this contact email.
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM mentors WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0) > 0)
    }

    /// Submit or re-submit a mentor application for a user.
    ///
    /// Inserts a fresh `pending` row, or overwrites the profile fields of
    /// the user's existing application while it is still undecided. An
    /// already-decided application is left untouched (`None` is returned).
    pub async fn save_application(
        pool: &PgPool,
        user_id: DbId,
        input: &SaveMentorApplication,
    ) -> Result<Option<Mentor>, sqlx::Error> {
        let query = format!(
            "INSERT INTO mentors \
                 (user_id, name, title, email, bio, years_experience, hourly_rate_cents) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 title = EXCLUDED.title, \
                 email = EXCLUDED.email, \
                 bio = EXCLUDED.bio, \
                 years_experience = EXCLUDED.years_experience, \
                 hourly_rate_cents = EXCLUDED.hourly_rate_cents, \
                 updated_at = NOW() \
             WHERE mentors.application_status = 'pending' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mentor>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.title)
            .bind(&input.email)
            .bind(&input.bio)
            .bind(input.years_experience)
            .bind(input.hourly_rate_cents)
            .fetch_optional(pool)
            .await
    }

    /// Create an admin-invited mentor profile.
    ///
    /// Invited mentors skip the application queue: the row is created
    /// approved and verified, with no user link until the invitee signs up
    /// and an admin links the account.
    pub async fn create_invited(
        pool: &PgPool,
        input: &SaveMentorApplication,
    ) -> Result<Mentor, sqlx::Error> {
        let query = format!(
            "INSERT INTO mentors \
                 (name, title, email, bio, years_experience, hourly_rate_cents, \
                  application_status, is_verified) \
             VALUES ($1, $2, $3, $4, $5, $6, 'approved', true) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mentor>(&query)
            .bind(&input.name)
            .bind(&input.title)
            .bind(&input.email)
            .bind(&input.bio)
            .bind(input.years_experience)
            .bind(input.hourly_rate_cents)
            .fetch_one(pool)
            .await
    }

    /// List applications awaiting an admin decision, oldest first.
    pub async fn list_pending_applications(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Mentor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mentors \
             WHERE application_status = 'pending' \
             ORDER BY created_at \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Mentor>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Decide a pending application: approve (also marking the mentor
    /// verified) or reject.
    ///
    /// Returns `None` when the application was already decided.
    pub async fn decide_application(
        pool: &PgPool,
        mentor_id: DbId,
        decision: ApplicationStatus,
    ) -> Result<Option<Mentor>, sqlx::Error> {
        let verified = decision == ApplicationStatus::Approved;
        let query = format!(
            "UPDATE mentors \
             SET application_status = $2, is_verified = $3, updated_at = NOW() \
             WHERE id = $1 AND application_status = 'pending' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mentor>(&query)
            .bind(mentor_id)
            .bind(decision.as_str())
            .bind(verified)
            .fetch_optional(pool)
            .await
    }

    /// Set the verification badge independently of the application flow.
    pub async fn set_verified(
        pool: &PgPool,
        mentor_id: DbId,
        verified: bool,
    ) -> Result<Option<Mentor>, sqlx::Error> {
        let query = format!(
            "UPDATE mentors SET is_verified = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mentor>(&query)
            .bind(mentor_id)
            .bind(verified)
            .fetch_optional(pool)
            .await
    }

    /// Link a user account to an unlinked mentor row.
    ///
    /// Returns `None` when the mentor is already linked to someone. A user
    /// already linked elsewhere trips `uq_mentors_user_id` and surfaces as
    /// a unique-constraint error.
    pub async fn link_user(
        pool: &PgPool,
        mentor_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Mentor>, sqlx::Error> {
        let query = format!(
            "UPDATE mentors SET user_id = $2, updated_at = NOW() \
             WHERE id = $1 AND user_id IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mentor>(&query)
            .bind(mentor_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Patch a mentor's own profile fields.
    pub async fn update_profile(
        pool: &PgPool,
        mentor_id: DbId,
        input: &UpdateMentorProfile,
    ) -> Result<Option<Mentor>, sqlx::Error> {
        let query = format!(
            "UPDATE mentors SET \
                 name = COALESCE($2, name), \
                 title = COALESCE($3, title), \
                 bio = COALESCE($4, bio), \
                 years_experience = COALESCE($5, years_experience), \
                 hourly_rate_cents = COALESCE($6, hourly_rate_cents), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mentor>(&query)
            .bind(mentor_id)
            .bind(&input.name)
            .bind(&input.title)
            .bind(&input.bio)
            .bind(input.years_experience)
            .bind(input.hourly_rate_cents)
            .fetch_optional(pool)
            .await
    }
}
