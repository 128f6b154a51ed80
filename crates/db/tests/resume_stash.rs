//! Repository-level tests for the single-consumption resume stash.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use mentorhub_db::repositories::StashRepo;

fn action() -> serde_json::Value {
    serde_json::json!({ "kind": "resume_booking", "mentor_id": 1, "slot_id": 2 })
}

/// A stashed action is returned exactly once.
#[sqlx::test]
async fn consume_is_single_use(pool: PgPool) {
    let token = Uuid::new_v4();
    StashRepo::create(&pool, token, &action(), "/mentors/1", Utc::now() + Duration::minutes(30))
        .await
        .expect("stash should insert");

    let first = StashRepo::consume(&pool, token).await.unwrap();
    let stash = first.expect("first consumption should return the stash");
    assert_eq!(stash.return_to, "/mentors/1");
    assert_eq!(stash.action["kind"], "resume_booking");

    let second = StashRepo::consume(&pool, token).await.unwrap();
    assert!(second.is_none(), "a consumed stash must not be replayable");
}

/// Two racing consumers: at most one gets the payload.
#[sqlx::test]
async fn concurrent_consumption_has_one_winner(pool: PgPool) {
    let token = Uuid::new_v4();
    StashRepo::create(&pool, token, &action(), "/", Utc::now() + Duration::minutes(30))
        .await
        .unwrap();

    let (r1, r2) = tokio::join!(
        StashRepo::consume(&pool, token),
        StashRepo::consume(&pool, token),
    );
    let wins = [r1.unwrap(), r2.unwrap()].into_iter().flatten().count();
    assert_eq!(wins, 1);
}

/// An expired stash is not consumable, and the retention purge removes it.
#[sqlx::test]
async fn expired_stashes_are_dead(pool: PgPool) {
    let token = Uuid::new_v4();
    StashRepo::create(&pool, token, &action(), "/", Utc::now() - Duration::minutes(1))
        .await
        .unwrap();

    let consumed = StashRepo::consume(&pool, token).await.unwrap();
    assert!(consumed.is_none());

    let purged = StashRepo::purge_expired(&pool).await.unwrap();
    assert_eq!(purged, 1);
}
