//! Outbound delivery channels.
//!
//! Currently email only; the [`EmailNotifier`](crate::notifier::EmailNotifier)
//! uses this module to push event-driven mail outside the platform.

pub mod email;
