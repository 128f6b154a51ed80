//! Event-to-notification routing engine.
//!
//! [`NotificationRouter`] subscribes to the domain event bus and, for each
//! event, resolves the affected users, writes a notification row per
//! recipient, and pushes the notification over any open WebSocket
//! connections. Everything here is best-effort: a failed insert or push is
//! logged and never fails the operation that published the event.

use std::sync::Arc;

use axum::extract::ws::Message;
use mentorhub_core::roles::ROLE_ADMIN;
use mentorhub_core::types::DbId;
use mentorhub_db::models::notification::CreateNotification;
use mentorhub_db::repositories::{MentorRepo, NotificationRepo};
use mentorhub_db::DbPool;
use mentorhub_events::{kinds, DomainEvent};
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Routes domain events to user notifications.
pub struct NotificationRouter {
    pool: DbPool,
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    /// Create a new router with the given database pool and WebSocket manager.
    pub fn new(pool: DbPool, ws_manager: Arc<WsManager>) -> Self {
        Self { pool, ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](mentorhub_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to route event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Route a single event to all affected users.
    async fn route_event(&self, event: &DomainEvent) -> Result<(), sqlx::Error> {
        let targets = self.determine_targets(event).await?;

        for user_id in targets {
            // Never notify someone about their own action.
            if event.actor_user_id == Some(user_id) {
                continue;
            }
            self.deliver(user_id, event).await;
        }

        Ok(())
    }

    /// Determine which users should receive a notification for the event.
    async fn determine_targets(&self, event: &DomainEvent) -> Result<Vec<DbId>, sqlx::Error> {
        match event.event_type.as_str() {
            // Booking requests go to the mentor's linked account.
            kinds::BOOKING_REQUESTED => {
                Ok(self.mentor_user(payload_id(event, "mentor_id")).await?.into_iter().collect())
            }

            // Confirmation and completion go to the client.
            kinds::BOOKING_CONFIRMED | kinds::BOOKING_COMPLETED => {
                Ok(payload_id(event, "client_id").into_iter().collect())
            }

            // Cancellation and reschedule concern both parties; the actor
            // is filtered out in route_event.
            kinds::BOOKING_CANCELLED | kinds::BOOKING_RESCHEDULED => {
                let mut targets: Vec<DbId> = payload_id(event, "client_id").into_iter().collect();
                if let Some(user_id) = self.mentor_user(payload_id(event, "mentor_id")).await? {
                    targets.push(user_id);
                }
                Ok(targets)
            }

            // Application decisions go to the applicant.
            kinds::MENTOR_APPROVED | kinds::MENTOR_REJECTED => {
                Ok(self.mentor_user(event.source_entity_id).await?.into_iter().collect())
            }

            // New reviews go to the reviewed mentor.
            kinds::REVIEW_SUBMITTED => {
                Ok(self.mentor_user(payload_id(event, "mentor_id")).await?.into_iter().collect())
            }

            // Submissions that need a human go to all active admins.
            kinds::MENTOR_APPLICATION_SUBMITTED | kinds::CONTACT_SUBMITTED => {
                self.admin_user_ids().await
            }

            _ => Ok(vec![]),
        }
    }

    /// Resolve a mentor id to its linked user account, if any.
    async fn mentor_user(&self, mentor_id: Option<DbId>) -> Result<Option<DbId>, sqlx::Error> {
        let Some(id) = mentor_id else {
            return Ok(None);
        };
        Ok(MentorRepo::find_by_id(&self.pool, id)
            .await?
            .and_then(|m| m.user_id))
    }

    /// Query all active users with the admin role.
    async fn admin_user_ids(&self) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT u.id FROM users u \
             JOIN roles r ON u.role_id = r.id \
             WHERE r.name = $1 AND u.is_active = true",
        )
        .bind(ROLE_ADMIN)
        .fetch_all(&self.pool)
        .await
    }

    /// Create a notification record and push it over WebSocket.
    async fn deliver(&self, user_id: DbId, event: &DomainEvent) {
        let (title, body) = render(event);

        let input = CreateNotification {
            user_id,
            kind: event.event_type.clone(),
            title,
            body,
            payload: event.payload.clone(),
        };

        if let Err(e) = NotificationRepo::create(&self.pool, &input).await {
            tracing::warn!(
                error = %e,
                user_id,
                event_type = %event.event_type,
                "Failed to create notification"
            );
        }

        let msg = serde_json::json!({
            "type": "notification",
            "kind": event.event_type,
            "title": input.title,
            "body": input.body,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        let ws_msg = Message::Text(msg.to_string().into());
        self.ws_manager.send_to_user(user_id, ws_msg).await;
    }
}

/// Render a human-readable title and body for an event kind.
fn render(event: &DomainEvent) -> (String, String) {
    let who = payload_str(event, "mentee_name");
    match event.event_type.as_str() {
        kinds::BOOKING_REQUESTED => (
            "New booking request".to_string(),
            format!("{who} requested a session"),
        ),
        kinds::BOOKING_CONFIRMED => (
            "Session confirmed".to_string(),
            "Your session has been confirmed".to_string(),
        ),
        kinds::BOOKING_CANCELLED => (
            "Session cancelled".to_string(),
            match payload_str_opt(event, "reason") {
                Some(reason) => format!("The session was cancelled: {reason}"),
                None => "The session was cancelled".to_string(),
            },
        ),
        kinds::BOOKING_RESCHEDULED => (
            "Session rescheduled".to_string(),
            "The session was moved to a different time slot".to_string(),
        ),
        kinds::BOOKING_COMPLETED => (
            "Session completed".to_string(),
            "Your session is complete. You can now leave a review.".to_string(),
        ),
        kinds::MENTOR_APPROVED => (
            "Application approved".to_string(),
            "Your mentor application has been approved".to_string(),
        ),
        kinds::MENTOR_REJECTED => (
            "Application decision".to_string(),
            "Your mentor application was not approved".to_string(),
        ),
        kinds::MENTOR_APPLICATION_SUBMITTED => (
            "New mentor application".to_string(),
            format!("{} applied to become a mentor", payload_str(event, "name")),
        ),
        kinds::REVIEW_SUBMITTED => (
            "New review".to_string(),
            format!("You received a {}-star review", payload_str(event, "rating")),
        ),
        kinds::CONTACT_SUBMITTED => (
            "New contact form".to_string(),
            format!("{} sent a message", payload_str(event, "name")),
        ),
        other => (other.to_string(), String::new()),
    }
}

fn payload_id(event: &DomainEvent, key: &str) -> Option<DbId> {
    event.payload.get(key).and_then(|v| v.as_i64())
}

fn payload_str<'a>(event: &'a DomainEvent, key: &str) -> std::borrow::Cow<'a, str> {
    match event.payload.get(key) {
        Some(serde_json::Value::String(s)) => std::borrow::Cow::Borrowed(s),
        Some(v) => std::borrow::Cow::Owned(v.to_string()),
        None => std::borrow::Cow::Borrowed("Someone"),
    }
}

fn payload_str_opt<'a>(event: &'a DomainEvent, key: &str) -> Option<&'a str> {
    event.payload.get(key).and_then(|v| v.as_str())
}
