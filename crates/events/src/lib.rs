//! MentorHub event bus and side-effect infrastructure.
//!
//! Building blocks for the marketplace's domain event system:
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`] -- the canonical event envelope, published after the
//!   owning database transaction commits.
//! - [`EventPersistence`] -- background service that durably writes every
//!   event to the `events` table.
//! - [`EmailNotifier`] -- best-effort outbound email per event kind;
//!   failures are logged and never propagated to the originating request.

pub mod bus;
pub mod delivery;
pub mod kinds;
pub mod notifier;
pub mod persistence;

pub use bus::{DomainEvent, EventBus};
pub use delivery::email::{EmailConfig, EmailDelivery};
pub use notifier::EmailNotifier;
pub use persistence::EventPersistence;
