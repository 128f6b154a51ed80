//! HTTP-level integration tests for the resume stash.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, post_json, post_json_auth};
use mentorhub_db::repositories::StashRepo;
use sqlx::PgPool;
use uuid::Uuid;

async fn signup_token(pool: &PgPool, email: &str) -> String {
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
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

fn stash_body() -> serde_json::Value {
    serde_json::json!({
        "action": { "kind": "resume_booking", "mentor_id": 7, "slot_id": 42 },
        "return_to": "/mentors/7/book",
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stash_can_be_created_without_authentication(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/resume-stash",
        stash_body(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["token"].is_string());
    assert!(json["data"]["expires_at"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn consume_requires_authentication(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/resume-stash",
        stash_body(),
    )
    .await;
    let token = body_json(response).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/resume-stash/{token}/consume"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stash_is_consumed_exactly_once(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/resume-stash",
        stash_body(),
    )
    .await;
    let stash_token = body_json(response).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    let auth = signup_token(&pool, "resumer@test.com").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/resume-stash/{stash_token}/consume"),
        &auth,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["action"]["kind"], "resume_booking");
    assert_eq!(json["data"]["action"]["mentor_id"], 7);
    assert_eq!(json["data"]["action"]["slot_id"], 42);
    assert_eq!(json["data"]["return_to"], "/mentors/7/book");

    // Replay gets 404.
    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/resume-stash/{stash_token}/consume"),
        &auth,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_token_returns_404(pool: PgPool) {
    let auth = signup_token(&pool, "nobody@test.com").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/resume-stash/{}/consume", Uuid::new_v4()),
        &auth,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn expired_stash_cannot_be_consumed(pool: PgPool) {
    // Insert directly with an expiry in the past.
    let token = Uuid::new_v4();
    let action = serde_json::json!({ "kind": "resume_booking", "mentor_id": 1, "slot_id": 2 });
    StashRepo::create(
        &pool,
        token,
        &action,
        "/mentors/1/book",
        Utc::now() - Duration::minutes(1),
    )
    .await
    .unwrap();

    let auth = signup_token(&pool, "late@test.com").await;
    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/resume-stash/{token}/consume"),
        &auth,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn an_unrecognized_action_kind_is_rejected(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/resume-stash",
        serde_json::json!({
            "action": { "kind": "resume_checkout", "order_id": 9 },
            "return_to": "/checkout",
        }),
    )
    .await;
    // Typed union: deserialization fails before the handler runs.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
