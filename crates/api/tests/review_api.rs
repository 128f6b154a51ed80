//! HTTP-level integration tests for review submission and the rating
//! aggregate.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, post_json, post_json_auth};
use mentorhub_core::application::ApplicationStatus;
use mentorhub_core::types::DbId;
use mentorhub_db::models::mentor::SaveMentorApplication;
use mentorhub_db::models::time_slot::CreateTimeSlot;
use mentorhub_db::repositories::{MentorRepo, SlotRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

async fn signup(pool: &PgPool, email: &str) -> (String, DbId) {
    let body = serde_json::json!({
        "email": email,
        "display_name": "User",
        "password": "long-enough-password",
    });
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/signup",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["access_token"].as_str().unwrap().to_string(),
        json["user"]["id"].as_i64().unwrap(),
    )
}

/// Full lifecycle up to a given point; returns
/// `(mentor_id, mentor_token, client_token, booking_id)`.
async fn booking_fixture(pool: &PgPool, tag: &str, completed: bool) -> (DbId, String, String, DbId) {
    let (mentor_token, mentor_user_id) = signup(pool, &format!("mentor-{tag}@test.com")).await;
    let application = SaveMentorApplication {
        name: "Mentor".to_string(),
        title: "Architect".to_string(),
        email: format!("mentor-profile-{tag}@test.com"),
        bio: None,
        years_experience: 12,
        hourly_rate_cents: 18_000,
    };
    let mentor = MentorRepo::save_application(pool, mentor_user_id, &application)
        .await
        .unwrap()
        .unwrap();
    MentorRepo::decide_application(pool, mentor.id, ApplicationStatus::Approved)
        .await
        .unwrap()
        .unwrap();
    MentorRepo::set_verified(pool, mentor.id, true)
        .await
        .unwrap()
        .unwrap();

    let starts_at = Utc::now() + Duration::days(1);
    let slot = SlotRepo::create(
        pool,
        mentor.id,
        &CreateTimeSlot {
            starts_at,
            ends_at: starts_at + Duration::hours(1),
        },
    )
    .await
    .unwrap();

    let (client_token, _) = signup(pool, &format!("client-{tag}@test.com")).await;
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/bookings",
        &client_token,
        serde_json::json!({
            "mentor_id": mentor.id,
            "slot_id": slot.id,
            "mentee_name": "Mentee",
            "mentee_email": "mentee@test.com",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    if completed {
        for action in ["confirm", "complete"] {
            let response = post_json_auth(
                common::build_test_app(pool.clone()),
                &format!("/api/v1/mentor/bookings/{booking_id}/{action}"),
                &mentor_token,
                serde_json::json!({}),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    (mentor.id, mentor_token, client_token, booking_id)
}

// ---------------------------------------------------------------------------
// Validation before any write
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn out_of_range_rating_is_rejected(pool: PgPool) {
    let (_, _, client, booking_id) = booking_fixture(&pool, "rating", true).await;

    for rating in [0, 6] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/bookings/{booking_id}/review"),
            &client,
            serde_json::json!({ "rating": rating, "comment": "fine" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_comment_is_rejected(pool: PgPool) {
    let (_, _, client, booking_id) = booking_fixture(&pool, "comment", true).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/bookings/{booking_id}/review"),
        &client,
        serde_json::json!({ "rating": 5, "comment": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Lifecycle constraints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn an_uncompleted_booking_cannot_be_reviewed(pool: PgPool) {
    let (_, _, client, booking_id) = booking_fixture(&pool, "pending", false).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/bookings/{booking_id}/review"),
        &client,
        serde_json::json!({ "rating": 5, "comment": "great session" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_the_booking_client_can_review(pool: PgPool) {
    let (_, _, _client, booking_id) = booking_fixture(&pool, "owner", true).await;
    let (outsider, _) = signup(&pool, "outsider@test.com").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/bookings/{booking_id}/review"),
        &outsider,
        serde_json::json!({ "rating": 1, "comment": "never happened" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn review_updates_the_mentor_rating_aggregate(pool: PgPool) {
    let (mentor_id, _, client, booking_id) = booking_fixture(&pool, "aggregate", true).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/bookings/{booking_id}/review"),
        &client,
        serde_json::json!({ "rating": 4, "comment": "solid advice" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let mentor = MentorRepo::find_by_id(&pool, mentor_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mentor.review_count, 1);
    assert!((mentor.rating_avg - 4.0).abs() < f64::EPSILON);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn a_booking_can_be_reviewed_only_once(pool: PgPool) {
    let (_, _, client, booking_id) = booking_fixture(&pool, "dup", true).await;

    let body = serde_json::json!({ "rating": 5, "comment": "excellent" });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/bookings/{booking_id}/review"),
        &client,
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/bookings/{booking_id}/review"),
        &client,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
