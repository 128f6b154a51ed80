//! Event-driven outbound email.
//!
//! [`EmailNotifier`] subscribes to the event bus and sends a plain-text
//! email for the event kinds that warrant one (booking lifecycle changes,
//! mentor application decisions, invites, signup welcome). Delivery is
//! strictly best-effort: failures are logged and never surface to the
//! request that published the event.

use mentorhub_db::repositories::{MentorRepo, UserRepo};
use mentorhub_db::DbPool;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::bus::DomainEvent;
use crate::delivery::email::{EmailDelivery, EmailError};
use crate::kinds;

/// Error type for a single notification attempt.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Recipient lookup failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// SMTP delivery failed.
    #[error("email error: {0}")]
    Email(#[from] EmailError),
}

/// A rendered outbound email.
struct OutboundMail {
    to: String,
    subject: String,
    body: String,
}

/// Background service that emails users about domain events.
pub struct EmailNotifier {
    pool: DbPool,
    delivery: EmailDelivery,
}

impl EmailNotifier {
    pub fn new(pool: DbPool, delivery: EmailDelivery) -> Self {
        Self { pool, delivery }
    }

    /// Run the notifier loop until the bus closes or shutdown is requested.
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Email notifier shutting down");
                    break;
                }
                result = receiver.recv() => match result {
                    Ok(event) => {
                        if let Err(e) = self.handle(&event).await {
                            tracing::warn!(
                                error = %e,
                                event_type = %event.event_type,
                                "Failed to send notification email"
                            );
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Email notifier lagged, some emails were skipped");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, email notifier shutting down");
                        break;
                    }
                },
            }
        }
    }

    /// Resolve the recipient for an event, render the mail, and send it.
    ///
    /// Event kinds with no email counterpart resolve to `None` and are
    /// silently skipped; in-app notifications cover those.
    async fn handle(&self, event: &DomainEvent) -> Result<(), NotifyError> {
        let Some(mail) = self.render(event).await? else {
            return Ok(());
        };
        self.delivery.send(&mail.to, &mail.subject, &mail.body).await?;
        Ok(())
    }

    async fn render(&self, event: &DomainEvent) -> Result<Option<OutboundMail>, NotifyError> {
        let mail = match event.event_type.as_str() {
            kinds::BOOKING_REQUESTED => {
                let Some(email) = self.mentor_email(payload_id(event, "mentor_id")).await? else {
                    return Ok(None);
                };
                OutboundMail {
                    to: email,
                    subject: "[MentorHub] New booking request".to_string(),
                    body: format!(
                        "You have a new booking request.\n\nSlot: {}\nRequested at: {}\n\n\
                         Confirm or decline it from your dashboard.",
                        payload_str(event, "starts_at"),
                        event.timestamp,
                    ),
                }
            }
            kinds::BOOKING_CONFIRMED
            | kinds::BOOKING_CANCELLED
            | kinds::BOOKING_RESCHEDULED
            | kinds::BOOKING_COMPLETED => {
                let Some(email) = self.user_email(payload_id(event, "client_id")).await? else {
                    return Ok(None);
                };
                let what = match event.event_type.as_str() {
                    kinds::BOOKING_CONFIRMED => "confirmed",
                    kinds::BOOKING_CANCELLED => "cancelled",
                    kinds::BOOKING_RESCHEDULED => "rescheduled",
                    _ => "marked as completed",
                };
                OutboundMail {
                    to: email,
                    subject: format!("[MentorHub] Your session was {what}"),
                    body: format!(
                        "Your session has been {what}.\n\nSlot: {}\nUpdated at: {}",
                        payload_str(event, "starts_at"),
                        event.timestamp,
                    ),
                }
            }
            kinds::MENTOR_APPROVED => {
                let Some(email) = self.mentor_email(event.source_entity_id).await? else {
                    return Ok(None);
                };
                OutboundMail {
                    to: email,
                    subject: "[MentorHub] Your mentor application was approved".to_string(),
                    body: "Congratulations, your mentor application has been approved.\n\n\
                           Sign in to publish time slots and start receiving bookings."
                        .to_string(),
                }
            }
            kinds::MENTOR_REJECTED => {
                let Some(email) = self.mentor_email(event.source_entity_id).await? else {
                    return Ok(None);
                };
                OutboundMail {
                    to: email,
                    subject: "[MentorHub] Your mentor application".to_string(),
                    body: "Thank you for applying to be a mentor.\n\n\
                           After review we are unable to approve your application at this time."
                        .to_string(),
                }
            }
            kinds::MENTOR_INVITED => {
                let Some(email) = self.mentor_email(event.source_entity_id).await? else {
                    return Ok(None);
                };
                OutboundMail {
                    to: email,
                    subject: "[MentorHub] You have been invited to join".to_string(),
                    body: format!(
                        "An administrator has created a mentor profile for you.\n\n\
                         Sign up with this email address to claim it: {}",
                        payload_str(event, "signup_url"),
                    ),
                }
            }
            kinds::USER_SIGNED_UP => {
                let Some(email) = self.user_email(event.actor_user_id).await? else {
                    return Ok(None);
                };
                OutboundMail {
                    to: email,
                    subject: "[MentorHub] Welcome".to_string(),
                    body: "Welcome to MentorHub.\n\n\
                           Browse mentors, pick a time slot, and book your first session."
                        .to_string(),
                }
            }
            // No email counterpart; covered by in-app notifications.
            _ => return Ok(None),
        };
        Ok(Some(mail))
    }

    async fn user_email(&self, user_id: Option<i64>) -> Result<Option<String>, NotifyError> {
        let Some(id) = user_id else {
            return Ok(None);
        };
        let user = UserRepo::find_by_id(&self.pool, id).await?;
        Ok(user.map(|u| u.email))
    }

    async fn mentor_email(&self, mentor_id: Option<i64>) -> Result<Option<String>, NotifyError> {
        let Some(id) = mentor_id else {
            return Ok(None);
        };
        let mentor = MentorRepo::find_by_id(&self.pool, id).await?;
        Ok(mentor.map(|m| m.email))
    }
}

fn payload_id(event: &DomainEvent, key: &str) -> Option<i64> {
    event.payload.get(key).and_then(|v| v.as_i64())
}

fn payload_str<'a>(event: &'a DomainEvent, key: &str) -> &'a str {
    event.payload.get(key).and_then(|v| v.as_str()).unwrap_or("(unknown)")
}
