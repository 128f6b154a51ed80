//! HTTP-level integration tests for signup, login, token refresh, logout,
//! and account lockout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, post_json_auth};
use sqlx::PgPool;

/// Sign up a user via the API and return the auth response JSON.
async fn signup_user(app: axum::Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "email": email,
        "display_name": "Test User",
        "password": password,
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn login_user(app: axum::Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_returns_tokens_and_client_role(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = signup_user(app, "new@test.com", "long-enough-password").await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["email"], "new@test.com");
    assert_eq!(json["user"]["display_name"], "Test User");
    assert_eq!(json["user"]["role"], "client");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_with_taken_email_returns_409(pool: PgPool) {
    signup_user(
        common::build_test_app(pool.clone()),
        "dup@test.com",
        "long-enough-password",
    )
    .await;

    let body = serde_json::json!({
        "email": "dup@test.com",
        "display_name": "Other",
        "password": "another-long-password",
    });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "short@test.com",
        "display_name": "Shorty",
        "password": "tiny",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_rejects_invalid_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "not-an-email",
        "display_name": "Nope",
        "password": "long-enough-password",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login and lockout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_succeeds_with_correct_credentials(pool: PgPool) {
    signup_user(
        common::build_test_app(pool.clone()),
        "login@test.com",
        "long-enough-password",
    )
    .await;

    let json = login_user(
        common::build_test_app(pool),
        "login@test.com",
        "long-enough-password",
    )
    .await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["email"], "login@test.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_with_wrong_password_returns_401(pool: PgPool) {
    signup_user(
        common::build_test_app(pool.clone()),
        "wrongpw@test.com",
        "long-enough-password",
    )
    .await;

    let body = serde_json::json!({ "email": "wrongpw@test.com", "password": "incorrect" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_with_unknown_email_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@test.com", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// After five consecutive failures the account is locked and even the
/// correct password is rejected with 403 until the lock expires.
#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_failures_lock_the_account(pool: PgPool) {
    signup_user(
        common::build_test_app(pool.clone()),
        "locked@test.com",
        "long-enough-password",
    )
    .await;

    for _ in 0..5 {
        let body = serde_json::json!({ "email": "locked@test.com", "password": "bad" });
        let response = post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/auth/login",
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let body = serde_json::json!({ "email": "locked@test.com", "password": "long-enough-password" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Refresh and logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_the_refresh_token(pool: PgPool) {
    let json = signup_user(
        common::build_test_app(pool.clone()),
        "rotate@test.com",
        "long-enough-password",
    )
    .await;
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_ne!(
        refreshed["refresh_token"].as_str().unwrap(),
        refresh_token,
        "refresh token must rotate on use"
    );

    // The old token was revoked by the rotation and cannot be used again.
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_with_garbage_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_all_sessions(pool: PgPool) {
    let json = signup_user(
        common::build_test_app(pool.clone()),
        "logout@test.com",
        "long-enough-password",
    )
    .await;
    let access_token = json["access_token"].as_str().unwrap();
    let refresh_token = json["refresh_token"].as_str().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/logout",
        access_token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Email existence check
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn email_exists_reflects_registration(pool: PgPool) {
    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/email-exists?email=someone@test.com",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["exists"], false);

    signup_user(
        common::build_test_app(pool.clone()),
        "someone@test.com",
        "long-enough-password",
    )
    .await;

    let response = get(
        common::build_test_app(pool),
        "/api/v1/auth/email-exists?email=someone@test.com",
    )
    .await;
    assert_eq!(body_json(response).await["exists"], true);
}
