//! Periodic cleanup of expired resume stashes.
//!
//! Expired stashes are already unconsumable (the consume query checks
//! `expires_at`), so this job is purely hygiene: it keeps the table from
//! accumulating dead rows. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::time::Duration;

use mentorhub_db::repositories::StashRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(600); // 10 minutes

/// Run the stash retention cleanup loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Stash retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Stash retention job stopping");
                break;
            }
            _ = interval.tick() => {
                match StashRepo::purge_expired(&pool).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Stash retention: purged expired stashes");
                        } else {
                            tracing::debug!("Stash retention: nothing to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Stash retention: cleanup failed");
                    }
                }
            }
        }
    }
}
