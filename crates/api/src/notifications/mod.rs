//! Event-to-notification routing.

mod router;

pub use router::NotificationRouter;
