//! HTTP-level integration tests for the booking lifecycle: slot claims,
//! confirmation, cancellation, rescheduling, and completion.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get_auth, post_json, post_json_auth};
use mentorhub_core::application::ApplicationStatus;
use mentorhub_core::types::DbId;
use mentorhub_db::models::mentor::{Mentor, SaveMentorApplication};
use mentorhub_db::models::time_slot::{CreateTimeSlot, TimeSlot};
use mentorhub_db::repositories::{MentorRepo, SlotRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Sign up a client via the API; returns `(access_token, user_id)`.
async fn signup(pool: &PgPool, email: &str) -> (String, DbId) {
    let body = serde_json::json!({
        "email": email,
        "display_name": "Client",
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

/// Sign up a user and promote them to an approved, verified mentor.
/// Returns the mentor row and the user's access token.
async fn setup_mentor(pool: &PgPool, email: &str) -> (Mentor, String) {
    let (token, user_id) = signup(pool, email).await;

    let application = SaveMentorApplication {
        name: "Mentor Person".to_string(),
        title: "Staff Engineer".to_string(),
        email: format!("profile-{email}"),
        bio: None,
        years_experience: 10,
        hourly_rate_cents: 15_000,
    };
    let mentor = MentorRepo::save_application(pool, user_id, &application)
        .await
        .unwrap()
        .unwrap();
    MentorRepo::decide_application(pool, mentor.id, ApplicationStatus::Approved)
        .await
        .unwrap()
        .unwrap();
    let mentor = MentorRepo::set_verified(pool, mentor.id, true)
        .await
        .unwrap()
        .unwrap();
    (mentor, token)
}

/// Publish a bookable slot starting `days` from now.
async fn create_slot(pool: &PgPool, mentor_id: DbId, days: i64) -> TimeSlot {
    let starts_at = Utc::now() + Duration::days(days);
    let input = CreateTimeSlot {
        starts_at,
        ends_at: starts_at + Duration::hours(1),
    };
    SlotRepo::create(pool, mentor_id, &input).await.unwrap()
}

fn book_body(mentor_id: DbId, slot_id: DbId) -> serde_json::Value {
    serde_json::json!({
        "mentor_id": mentor_id,
        "slot_id": slot_id,
        "mentee_name": "Mentee",
        "mentee_email": "mentee@test.com",
    })
}

/// Book a slot via the API, asserting success; returns the booking JSON.
async fn book(pool: &PgPool, token: &str, mentor_id: DbId, slot_id: DbId) -> serde_json::Value {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/bookings",
        token,
        book_body(mentor_id, slot_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Booking a slot
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn booking_a_slot_creates_pending_and_claims_the_slot(pool: PgPool) {
    let (mentor, _) = setup_mentor(&pool, "m1@test.com").await;
    let slot = create_slot(&pool, mentor.id, 1).await;
    let (token, _) = signup(&pool, "c1@test.com").await;

    let json = book(&pool, &token, mentor.id, slot.id).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["slot_id"], slot.id);

    let slot = SlotRepo::find_by_id(&pool, slot.id).await.unwrap().unwrap();
    assert!(!slot.available, "claimed slot must become unavailable");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn booking_a_taken_slot_returns_409(pool: PgPool) {
    let (mentor, _) = setup_mentor(&pool, "m2@test.com").await;
    let slot = create_slot(&pool, mentor.id, 1).await;
    let (first, _) = signup(&pool, "c2a@test.com").await;
    let (second, _) = signup(&pool, "c2b@test.com").await;

    book(&pool, &first, mentor.id, slot.id).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/bookings",
        &second,
        book_body(mentor.id, slot.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn booking_an_unknown_slot_returns_404(pool: PgPool) {
    let (mentor, _) = setup_mentor(&pool, "m3@test.com").await;
    let (token, _) = signup(&pool, "c3@test.com").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/bookings",
        &token,
        book_body(mentor.id, 999_999),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn booking_requires_authentication(pool: PgPool) {
    let (mentor, _) = setup_mentor(&pool, "m4@test.com").await;
    let slot = create_slot(&pool, mentor.id, 1).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/bookings",
        book_body(mentor.id, slot.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn clients_see_only_their_own_bookings(pool: PgPool) {
    let (mentor, _) = setup_mentor(&pool, "m5@test.com").await;
    let slot_a = create_slot(&pool, mentor.id, 1).await;
    let slot_b = create_slot(&pool, mentor.id, 2).await;
    let (alice, _) = signup(&pool, "alice@test.com").await;
    let (bob, _) = signup(&pool, "bob@test.com").await;

    book(&pool, &alice, mentor.id, slot_a.id).await;
    book(&pool, &bob, mentor.id, slot_b.id).await;

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/bookings",
        &alice,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let bookings = json["data"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["slot_id"], slot_a.id);
}

// ---------------------------------------------------------------------------
// Confirm / decline
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn mentor_confirms_a_pending_booking(pool: PgPool) {
    let (mentor, mentor_token) = setup_mentor(&pool, "m6@test.com").await;
    let slot = create_slot(&pool, mentor.id, 1).await;
    let (client, _) = signup(&pool, "c6@test.com").await;
    let booking = book(&pool, &client, mentor.id, slot.id).await;
    let booking_id = booking["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/mentor/bookings/{booking_id}/confirm"),
        &mentor_token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "confirmed");

    // A second confirm is not a valid transition.
    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/mentor/bookings/{booking_id}/confirm"),
        &mentor_token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn mentor_cannot_touch_another_mentors_booking(pool: PgPool) {
    let (mentor, _) = setup_mentor(&pool, "m7@test.com").await;
    let (_other, other_token) = setup_mentor(&pool, "m8@test.com").await;
    let slot = create_slot(&pool, mentor.id, 1).await;
    let (client, _) = signup(&pool, "c7@test.com").await;
    let booking = book(&pool, &client, mentor.id, slot.id).await;
    let booking_id = booking["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/mentor/bookings/{booking_id}/confirm"),
        &other_token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Cancel
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn cancelling_frees_the_slot_for_rebooking(pool: PgPool) {
    let (mentor, _) = setup_mentor(&pool, "m9@test.com").await;
    let slot = create_slot(&pool, mentor.id, 1).await;
    let (client, _) = signup(&pool, "c9@test.com").await;
    let booking = book(&pool, &client, mentor.id, slot.id).await;
    let booking_id = booking["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/bookings/{booking_id}/cancel"),
        &client,
        serde_json::json!({ "reason": "schedule conflict" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "cancelled");
    assert_eq!(json["data"]["cancel_reason"], "schedule conflict");

    // The slot is available again and another client can claim it.
    let (other, _) = signup(&pool, "c9b@test.com").await;
    book(&pool, &other, mentor.id, slot.id).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn a_stranger_cannot_cancel_someone_elses_booking(pool: PgPool) {
    let (mentor, _) = setup_mentor(&pool, "m10@test.com").await;
    let slot = create_slot(&pool, mentor.id, 1).await;
    let (client, _) = signup(&pool, "c10@test.com").await;
    let (stranger, _) = signup(&pool, "stranger@test.com").await;
    let booking = book(&pool, &client, mentor.id, slot.id).await;
    let booking_id = booking["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/bookings/{booking_id}/cancel"),
        &stranger,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn a_completed_booking_cannot_be_cancelled(pool: PgPool) {
    let (mentor, mentor_token) = setup_mentor(&pool, "m11@test.com").await;
    let slot = create_slot(&pool, mentor.id, 1).await;
    let (client, _) = signup(&pool, "c11@test.com").await;
    let booking = book(&pool, &client, mentor.id, slot.id).await;
    let booking_id = booking["data"]["id"].as_i64().unwrap();

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

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/bookings/{booking_id}/cancel"),
        &client,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Reschedule
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn rescheduling_moves_the_booking_and_swaps_slots(pool: PgPool) {
    let (mentor, _) = setup_mentor(&pool, "m12@test.com").await;
    let old_slot = create_slot(&pool, mentor.id, 1).await;
    let new_slot = create_slot(&pool, mentor.id, 2).await;
    let (client, _) = signup(&pool, "c12@test.com").await;
    let booking = book(&pool, &client, mentor.id, old_slot.id).await;
    let booking_id = booking["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/bookings/{booking_id}/reschedule"),
        &client,
        serde_json::json!({ "new_slot_id": new_slot.id, "reason": "works better for me" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slot_id"], new_slot.id);
    // The note is event-payload material; the row's cancellation reason
    // stays reserved for actual cancellations.
    assert_eq!(json["data"]["cancel_reason"], serde_json::Value::Null);

    let old_slot = SlotRepo::find_by_id(&pool, old_slot.id)
        .await
        .unwrap()
        .unwrap();
    assert!(old_slot.available, "old slot must be released");
    let new_slot = SlotRepo::find_by_id(&pool, new_slot.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!new_slot.available, "new slot must be claimed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rescheduling_onto_a_taken_slot_returns_409_without_mutating(pool: PgPool) {
    let (mentor, _) = setup_mentor(&pool, "m13@test.com").await;
    let my_slot = create_slot(&pool, mentor.id, 1).await;
    let taken_slot = create_slot(&pool, mentor.id, 2).await;
    let (client, _) = signup(&pool, "c13a@test.com").await;
    let (other, _) = signup(&pool, "c13b@test.com").await;

    let booking = book(&pool, &client, mentor.id, my_slot.id).await;
    let booking_id = booking["data"]["id"].as_i64().unwrap();
    book(&pool, &other, mentor.id, taken_slot.id).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/bookings/{booking_id}/reschedule"),
        &client,
        serde_json::json!({ "new_slot_id": taken_slot.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The original claim is untouched.
    let my_slot = SlotRepo::find_by_id(&pool, my_slot.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!my_slot.available, "failed reschedule must not release the held slot");
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn only_confirmed_bookings_can_be_completed(pool: PgPool) {
    let (mentor, mentor_token) = setup_mentor(&pool, "m14@test.com").await;
    let slot = create_slot(&pool, mentor.id, 1).await;
    let (client, _) = signup(&pool, "c14@test.com").await;
    let booking = book(&pool, &client, mentor.id, slot.id).await;
    let booking_id = booking["data"]["id"].as_i64().unwrap();

    // Still pending: completing is a conflict.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/mentor/bookings/{booking_id}/complete"),
        &mentor_token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/mentor/bookings/{booking_id}/confirm"),
        &mentor_token,
        serde_json::json!({}),
    )
    .await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/mentor/bookings/{booking_id}/no-show"),
        &mentor_token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "no_show");
}
